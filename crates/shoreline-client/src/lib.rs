//! Client library for the workflow execution service.
//!
//! Serializes a validated workflow graph into the service's wire format,
//! submits it, and reads back job status.

pub mod config;
pub mod error;
pub mod http;
pub mod wire;

pub use config::Config;
pub use error::ClientError;
pub use http::WorkflowClient;
