//! Registry of remote operations and their slot contracts.
//!
//! The execution service identifies tasks by string names. Keeping them in
//! a closed enum, with the input and output slots each one declares, lets
//! a graph be checked locally instead of failing at submission time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A remote operation offered by the processing platform.
///
/// The slot tables mirror the platform's published task contracts; the
/// platform itself remains the authority on what each operation computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Pairwise change-readiness extraction: aligns a post-event raster
    /// against a pre-event raster.
    CdReady,
    /// Water layer delineation on a single raster.
    WaterExtract,
    /// Land-use exclusion mask derived from an aligned raster pair.
    LulcMask,
    /// Tri-state water change classification (gain, loss, unchanged).
    BinaryTristate,
    /// Binary water gain classification.
    BinaryGain,
    /// Binary water loss classification.
    BinaryLoss,
    /// Distance transform over the gain layer.
    GainDistance,
    /// Distance transform over the loss layer.
    LossDistance,
}

impl Operation {
    /// The operation name understood by the execution service.
    pub fn remote_name(&self) -> &'static str {
        match self {
            Self::CdReady => "protogenV2CD_READY",
            Self::WaterExtract => "protogenV2RAW",
            Self::LulcMask => "protogenV2CD_LULC",
            Self::BinaryTristate => "protogenV2CD_BIN_TRI",
            Self::BinaryGain => "protogenV2CD_BIN_GAIN",
            Self::BinaryLoss => "protogenV2CD_BIN_LOSS",
            Self::GainDistance => "protogenV2CD_GDDT",
            Self::LossDistance => "protogenV2CD_LDDT",
        }
    }

    /// Input slots this operation expects. All of them must be bound
    /// before a graph containing the node is valid.
    pub fn input_slots(&self) -> &'static [&'static str] {
        match self {
            Self::CdReady | Self::LulcMask => &["raster", "slave"],
            Self::WaterExtract => &["raster"],
            Self::BinaryTristate | Self::BinaryGain | Self::BinaryLoss => {
                &["raster", "slave", "mask"]
            }
            Self::GainDistance | Self::LossDistance => &["raster", "slave"],
        }
    }

    /// Output slots this operation produces.
    pub fn output_slots(&self) -> &'static [&'static str] {
        match self {
            // CD_READY emits the aligned post raster as `data` and the
            // aligned pre raster as `slave`.
            Self::CdReady => &["data", "slave"],
            _ => &["data"],
        }
    }

    /// Returns true if `slot` is a declared input slot.
    pub fn has_input_slot(&self, slot: &str) -> bool {
        self.input_slots().contains(&slot)
    }

    /// Returns true if `slot` is a declared output slot.
    pub fn has_output_slot(&self, slot: &str) -> bool {
        self.output_slots().contains(&slot)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.remote_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_names() {
        assert_eq!(Operation::CdReady.remote_name(), "protogenV2CD_READY");
        assert_eq!(Operation::WaterExtract.remote_name(), "protogenV2RAW");
        assert_eq!(Operation::LossDistance.remote_name(), "protogenV2CD_LDDT");
    }

    #[test]
    fn test_slot_tables() {
        assert!(Operation::CdReady.has_output_slot("slave"));
        assert!(!Operation::WaterExtract.has_output_slot("slave"));
        assert!(Operation::BinaryGain.has_input_slot("mask"));
        assert!(!Operation::GainDistance.has_input_slot("mask"));
    }
}
