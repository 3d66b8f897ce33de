//! Result type alias for kai operations.

use super::kai_error::KaiError;

/// Type alias for Results using KaiError.
///
/// # Example
///
/// ```ignore
/// use kai::error::KaiResult;
///
/// async fn generate(client: &ContentAgentClient) -> KaiResult<String> {
///     client.generate(&request, token, None).await
/// }
/// ```
pub type KaiResult<T> = Result<T, KaiError>;
