//! Error handling for kai.
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Domain-specific Errors**: Network and Stream errors
//! - **Unified Error Type**: `KaiError` consolidates them with config errors
//! - **Result Type Alias**: `KaiResult<T>` for consistent return types
//!
//! The stream decoder itself only ever returns the transport error of its
//! reader. Everything here is produced by the request wrapper and adapters.
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection failure, timeout | Yes |
//! | Auth | HTTP 401/403 | No |
//! | Server | HTTP 5xx, missing body | 5xx only |
//! | Client | HTTP 4xx, invalid request | No |
//! | Configuration | Missing env/config | No |

mod category;
mod kai_error;
mod network;
mod result;
mod stream;

// Re-export all public types
pub use category::ErrorCategory;
pub use kai_error::KaiError;
pub use network::{classify_reqwest_error, NetworkError};
pub use result::KaiResult;
pub use stream::StreamError;
