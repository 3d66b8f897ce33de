//! Content agent configuration.
//!
//! Configuration is passed explicitly to [`ContentAgentClient`]. Only the
//! binary reads the environment, through [`AgentConfig::from_env`].
//!
//! [`ContentAgentClient`]: crate::agent::ContentAgentClient

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the API base URL.
pub const ENV_BASE_URL: &str = "KAI_API_BASE_URL";
/// Environment variable holding the public API key.
pub const ENV_API_KEY: &str = "KAI_API_KEY";
/// Environment variable overriding the content agent path.
pub const ENV_AGENT_PATH: &str = "KAI_CONTENT_AGENT_PATH";

/// Path of the content generation function under the base URL.
pub const DEFAULT_CONTENT_AGENT_PATH: &str = "/functions/v1/kai-content-agent";

/// Connect timeout (seconds) for the HTTP connector.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("Invalid base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),

    #[error("API key must not be empty")]
    EmptyApiKey,
}

/// Settings for talking to the content agent endpoint.
///
/// # Example
///
/// ```ignore
/// use kai::config::AgentConfig;
///
/// let config = AgentConfig::new("https://project.example.co", "public-anon-key")?
///     .with_endpoint_path("/functions/v1/kai-content-agent");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Public API key sent as the `apikey` header
    api_key: String,
    /// Path of the content agent function
    pub endpoint_path: String,
    /// Connect timeout for the production HTTP client
    pub connect_timeout: Duration,
}

impl AgentConfig {
    /// Create a config for `base_url` with the default endpoint path.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        let api_key = api_key.into();

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }
        if api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            endpoint_path: DEFAULT_CONTENT_AGENT_PATH.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        })
    }

    /// Override the content agent path.
    pub fn with_endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = path.into();
        self
    }

    /// Override the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// The public API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Full URL of the content agent endpoint.
    pub fn endpoint_url(&self) -> String {
        let path = self.endpoint_path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    /// Build a config from `KAI_API_BASE_URL`, `KAI_API_KEY` and the
    /// optional `KAI_CONTENT_AGENT_PATH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_BASE_URL).ok_or(ConfigError::MissingVar(ENV_BASE_URL))?;
        let api_key = lookup(ENV_API_KEY).ok_or(ConfigError::MissingVar(ENV_API_KEY))?;

        let config = Self::new(base_url, api_key)?;
        Ok(match lookup(ENV_AGENT_PATH) {
            Some(path) if !path.trim().is_empty() => config.with_endpoint_path(path),
            _ => config,
        })
    }
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("endpoint_path", &self.endpoint_path)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}
