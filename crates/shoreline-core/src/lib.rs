//! Shoreline Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - The remote execution service's wire format
//! - Runtime specifics
//!
//! All types here describe workflow graphs of named remote tasks and the
//! fixed coastal change detection pipeline built from them.

pub mod error;
pub mod graph;
pub mod ids;
pub mod node;
pub mod operation;
pub mod pipeline;
pub mod status;

// Re-export commonly used types
pub use error::GraphError;
pub use graph::{SaveDirective, WorkflowGraph};
pub use ids::{JobId, NodeId};
pub use node::{Input, OutputRef, TaskNode};
pub use operation::Operation;
pub use pipeline::{build_coastal_change_graph, CoastalChangeRequest};
pub use status::JobStatus;
