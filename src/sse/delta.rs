//! Extraction of text deltas from OpenAI-compatible chunk payloads.
//!
//! Expected shape: `{"choices":[{"delta":{"content":"..."}}]}`. Anything
//! else that is still valid JSON simply carries no content.

use serde_json::Value;

/// Result of inspecting one `data:` payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeltaOutcome {
    /// Non-empty text fragment at `choices[0].delta.content`
    Content(String),
    /// Valid JSON without a usable fragment (role-only delta, usage frame, ...)
    NoContent,
    /// Payload was not valid JSON
    Malformed,
}

/// Parse a payload and pull out its text delta.
pub fn extract_delta(payload: &str) -> DeltaOutcome {
    let Ok(value) = serde_json::from_str::<Value>(payload) else {
        return DeltaOutcome::Malformed;
    };

    match delta_content(&value) {
        Some(text) if !text.is_empty() => DeltaOutcome::Content(text.to_string()),
        _ => DeltaOutcome::NoContent,
    }
}

fn delta_content(value: &Value) -> Option<&str> {
    value
        .get("choices")?
        .get(0)?
        .get("delta")?
        .get("content")?
        .as_str()
}
