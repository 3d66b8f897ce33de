//! SSE (Server-Sent Events) delta stream decoder
//!
//! Decodes OpenAI-compatible chat-completion streams:
//! - `data: <json>` - event payload line
//! - `data: [DONE]` - end-of-stream sentinel
//! - Empty line - event separator (ignored)
//! - Lines starting with `:` - comments (ignored)
//!
//! # Module structure
//! - `decoder` - Incremental UTF-8 decoding across chunk boundaries
//! - `framer` - Newline framing with a carried partial line
//! - `line` - Line classification (data, comment, sentinel)
//! - `delta` - `choices[0].delta.content` extraction
//! - `accumulator` - The decode loop and its public entry points

mod accumulator;
mod decoder;
mod delta;
mod framer;
mod line;

// Re-export public types
pub use accumulator::{
    parse_openai_stream, parse_openai_stream_with_summary, parse_sse_stream,
    parse_sse_stream_with_progress, ParseOptions, StreamAccumulator, StreamSummary,
};
pub use decoder::Utf8ChunkDecoder;
pub use delta::{extract_delta, DeltaOutcome};
pub use framer::LineFramer;
pub use line::{classify_line, StreamLine, DATA_PREFIX, DONE_SENTINEL};
