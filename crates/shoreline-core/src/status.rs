//! Job status as reported by the execution service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a submitted workflow job.
///
/// The execution service owns the vocabulary; both fields are carried as
/// opaque strings and only compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    /// Coarse state, e.g. "pending" or "running".
    pub state: String,
    /// Most recent lifecycle event, e.g. "submitted".
    pub event: String,
}

impl JobStatus {
    /// Returns true if the job can no longer change state.
    pub fn is_terminal(&self) -> bool {
        ["succeeded", "failed", "canceled"]
            .iter()
            .any(|s| self.state.eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.state, self.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        let pending = JobStatus {
            state: "pending".to_string(),
            event: "submitted".to_string(),
        };
        assert!(!pending.is_terminal());

        let failed = JobStatus {
            state: "FAILED".to_string(),
            event: "task_failed".to_string(),
        };
        assert!(failed.is_terminal());
    }
}
