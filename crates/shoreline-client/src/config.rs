//! Client configuration.

/// Configuration for the workflow execution service client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the execution service API.
    pub api_url: String,

    /// Bearer token for authenticated requests, if required.
    pub auth_token: Option<String>,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration, letting `SHORELINE_API_URL` and
    /// `SHORELINE_API_TOKEN` override the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("SHORELINE_API_URL") {
            config.api_url = url;
        }
        if let Ok(token) = std::env::var("SHORELINE_API_TOKEN") {
            config.auth_token = Some(token);
        }
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://geobigdata.io".to_string(),
            auth_token: None,
            request_timeout_secs: 60,
        }
    }
}
