//! Error category classification for unified error handling.

use std::fmt;

/// High-level categorization of errors for handling decisions.
///
/// Categories drive retry policy and user messaging. Nothing in this crate
/// retries automatically; the category only tells callers what is safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (connection, timeout, dropped stream).
    /// Generally transient and retryable.
    Network,

    /// Authentication/authorization errors (HTTP 401/403).
    /// Requires a fresh access token.
    Auth,

    /// Backend/server-side errors (HTTP 5xx, missing body).
    /// Generally transient and retryable after delay.
    Server,

    /// Client-side errors (bad request, unexpected response shape).
    /// Not retryable without changing the request.
    Client,

    /// Configuration errors (missing API key or base URL).
    /// Not retryable until configuration is corrected.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Auth => "Sign in again to refresh your session",
            ErrorCategory::Server => {
                "The content service may be experiencing issues. Please try again later"
            }
            ErrorCategory::Client => "Check the request parameters and try again",
            ErrorCategory::Configuration => {
                "Check KAI_API_BASE_URL and KAI_API_KEY in your environment"
            }
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
