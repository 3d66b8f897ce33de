//! Classification of single SSE lines.

/// Prefix that marks an event payload line.
pub const DATA_PREFIX: &str = "data: ";

/// Payload that marks the logical end of a completion stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Represents one classified line of an SSE stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamLine<'a> {
    /// Blank line (event separator)
    Empty,
    /// Comment line (starts with ':'), often a keepalive
    Comment(&'a str),
    /// `data: [DONE]`
    Done,
    /// Payload of a `data: ` line, trimmed
    Data(&'a str),
    /// Any other field (`event:`, `id:`, `retry:`, garbage)
    Other(&'a str),
}

/// Classify a raw line (without its newline).
///
/// Surrounding whitespace is ignored, which also strips the `\r` of CRLF
/// framed streams.
pub fn classify_line(raw: &str) -> StreamLine<'_> {
    let line = raw.trim();

    if line.is_empty() {
        return StreamLine::Empty;
    }

    if let Some(comment) = line.strip_prefix(':') {
        return StreamLine::Comment(comment.trim());
    }

    match line.strip_prefix(DATA_PREFIX) {
        Some(payload) => {
            let payload = payload.trim();
            if payload == DONE_SENTINEL {
                StreamLine::Done
            } else {
                StreamLine::Data(payload)
            }
        }
        None => StreamLine::Other(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_empty_and_whitespace() {
        assert_eq!(classify_line(""), StreamLine::Empty);
        assert_eq!(classify_line("   \r"), StreamLine::Empty);
    }

    #[test]
    fn test_classify_comment() {
        assert_eq!(classify_line(": keepalive"), StreamLine::Comment("keepalive"));
        assert_eq!(classify_line(":"), StreamLine::Comment(""));
    }

    #[test]
    fn test_classify_done() {
        assert_eq!(classify_line("data: [DONE]"), StreamLine::Done);
        assert_eq!(classify_line("data: [DONE]\r"), StreamLine::Done);
        assert_eq!(classify_line("  data:   [DONE]  "), StreamLine::Done);
    }

    #[test]
    fn test_classify_data_trims_payload() {
        assert_eq!(
            classify_line("data: {\"a\":1}  \r"),
            StreamLine::Data("{\"a\":1}")
        );
        assert_eq!(classify_line("data: x"), StreamLine::Data("x"));
    }

    #[test]
    fn test_data_prefix_requires_space() {
        // `data:` without the space is not the prefix this stream uses
        assert_eq!(classify_line("data:{}"), StreamLine::Other("data:{}"));
    }

    #[test]
    fn test_classify_other_fields() {
        assert_eq!(classify_line("event: content"), StreamLine::Other("event: content"));
        assert_eq!(classify_line("id: 7"), StreamLine::Other("id: 7"));
        assert_eq!(classify_line("retry: 100"), StreamLine::Other("retry: 100"));
    }
}
