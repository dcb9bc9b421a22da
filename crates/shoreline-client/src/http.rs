//! HTTP client for the workflow execution service.

use std::time::Duration;

use tracing::debug;

use shoreline_core::{JobId, JobStatus, WorkflowGraph};

use crate::config::Config;
use crate::error::ClientError;
use crate::wire::{StatusResponse, SubmitResponse, WorkflowRequest};

/// Client for the execution service's workflow API.
///
/// One instance per invocation; holds no state beyond the connection
/// pool and credentials.
pub struct WorkflowClient {
    inner: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl WorkflowClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            inner,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Submit a workflow graph for execution.
    ///
    /// The graph is serialized as-is; validate it first. Returns the job
    /// identifier assigned by the service.
    pub async fn submit(&self, graph: &WorkflowGraph) -> Result<JobId, ClientError> {
        let url = format!("{}/workflows", self.base_url);
        debug!(url = %url, tasks = graph.nodes.len(), saves = graph.saves.len(), "Submitting workflow");

        let mut request = self.inner.post(&url).json(&WorkflowRequest::from(graph));
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let submitted: SubmitResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))?;
        Ok(JobId::new(submitted.id))
    }

    /// Read the current status of a submitted job.
    pub async fn status(&self, id: &JobId) -> Result<JobStatus, ClientError> {
        let url = format!("{}/workflows/{}", self.base_url, id);
        debug!(url = %url, "Fetching job status");

        let mut request = self.inner.get(&url);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let status: StatusResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))?;
        Ok(status.into())
    }
}
