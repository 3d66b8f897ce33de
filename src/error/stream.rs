//! Streaming-related error types.

use std::fmt;

/// Errors about the shape of a streaming response.
///
/// Malformed event payloads are never errors; the decoder skips them and
/// counts them in its summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Response succeeded but has no readable body.
    MissingBody {
        status: u16,
    },
}

impl StreamError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            StreamError::MissingBody { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::MissingBody { .. } => {
                "The server returned an empty response. Please try again.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::MissingBody { .. } => "E_STREAM_NO_BODY",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::MissingBody { status } => {
                write!(f, "Response (HTTP {}) has no readable body", status)
            }
        }
    }
}

impl std::error::Error for StreamError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_body_not_retryable() {
        let err = StreamError::MissingBody { status: 204 };
        assert!(!err.is_retryable());
        assert_eq!(err.error_code(), "E_STREAM_NO_BODY");
        assert_eq!(err.to_string(), "Response (HTTP 204) has no readable body");
    }
}
