//! Unified error type for the kai crate.

use std::fmt;

use super::category::ErrorCategory;
use super::network::NetworkError;
use super::stream::StreamError;
use crate::config::ConfigError;

/// Unified error type for content agent operations.
#[derive(Debug)]
pub enum KaiError {
    /// Network-related errors (connections, HTTP status, transport).
    Network(NetworkError),

    /// Streaming response shape errors.
    Stream(StreamError),

    /// Missing or invalid configuration.
    Config(ConfigError),
}

impl KaiError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            KaiError::Network(err) => match err.status() {
                Some(401) | Some(403) => ErrorCategory::Auth,
                Some(status) if status >= 500 => ErrorCategory::Server,
                Some(_) => ErrorCategory::Client,
                None => match err {
                    NetworkError::InvalidResponse { .. } => ErrorCategory::Client,
                    _ => ErrorCategory::Network,
                },
            },
            KaiError::Stream(StreamError::MissingBody { .. }) => ErrorCategory::Server,
            KaiError::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            KaiError::Network(err) => err.is_retryable(),
            KaiError::Stream(err) => err.is_retryable(),
            KaiError::Config(_) => false,
        }
    }

    /// Check if this error requires a new access token.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, KaiError::Network(NetworkError::HttpStatus { status: 401, .. }))
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            KaiError::Network(err) => err.user_message(),
            KaiError::Stream(err) => err.user_message(),
            KaiError::Config(err) => format!("Configuration error: {}", err),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            KaiError::Network(err) => err.error_code(),
            KaiError::Stream(err) => err.error_code(),
            KaiError::Config(_) => "E_CONFIG",
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for KaiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KaiError::Network(err) => write!(f, "{}", err),
            KaiError::Stream(err) => write!(f, "{}", err),
            KaiError::Config(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for KaiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KaiError::Network(err) => Some(err),
            KaiError::Stream(err) => Some(err),
            KaiError::Config(err) => Some(err),
        }
    }
}

impl From<NetworkError> for KaiError {
    fn from(err: NetworkError) -> Self {
        KaiError::Network(err)
    }
}

impl From<StreamError> for KaiError {
    fn from(err: StreamError) -> Self {
        KaiError::Stream(err)
    }
}

impl From<ConfigError> for KaiError {
    fn from(err: ConfigError) -> Self {
        KaiError::Config(err)
    }
}
