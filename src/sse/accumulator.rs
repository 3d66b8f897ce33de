//! Delta accumulation over a chunked byte stream.
//!
//! Every chunk goes through decoder → framer → line classification →
//! delta extraction, and extracted fragments are appended in arrival order.

use futures::Stream;
use futures_util::StreamExt;
use std::fmt;
use tracing::{debug, warn};

use super::decoder::Utf8ChunkDecoder;
use super::delta::{extract_delta, DeltaOutcome};
use super::framer::LineFramer;
use super::line::{classify_line, StreamLine};

type ProgressFn<'a> = Box<dyn FnMut(&str) + Send + 'a>;
type ChunkFn<'a> = Box<dyn FnMut(usize) + Send + 'a>;

/// Optional callbacks invoked while a stream is decoded.
///
/// Callbacks run inline on the decode loop. Long synchronous work inside
/// them stalls decoding of the rest of the stream.
#[derive(Default)]
pub struct ParseOptions<'a> {
    on_progress: Option<ProgressFn<'a>>,
    on_chunk: Option<ChunkFn<'a>>,
}

impl<'a> ParseOptions<'a> {
    /// Options with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with each new fragment (not the cumulative text).
    pub fn with_on_progress(mut self, f: impl FnMut(&str) + Send + 'a) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Called with the 1-based count of fragments extracted so far.
    pub fn with_on_chunk(mut self, f: impl FnMut(usize) + Send + 'a) -> Self {
        self.on_chunk = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for ParseOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("on_progress", &self.on_progress.is_some())
            .field("on_chunk", &self.on_chunk.is_some())
            .finish()
    }
}

/// Outcome of decoding a whole stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Concatenated fragments, trimmed
    pub content: String,
    /// Number of fragments appended
    pub fragments: usize,
    /// `data:` lines dropped because their payload was not valid JSON
    pub dropped_lines: usize,
    /// Complete lines seen, including blanks and comments
    pub lines: usize,
}

/// Push-based stream decoder.
///
/// Feed transport chunks with [`push_chunk`](Self::push_chunk) and call
/// [`finish`](Self::finish) once the source reports completion.
pub struct StreamAccumulator<'a> {
    decoder: Utf8ChunkDecoder,
    framer: LineFramer,
    content: String,
    fragments: usize,
    dropped_lines: usize,
    lines: usize,
    options: ParseOptions<'a>,
}

impl<'a> StreamAccumulator<'a> {
    /// Create an accumulator that reports through `options`.
    pub fn new(options: ParseOptions<'a>) -> Self {
        Self {
            decoder: Utf8ChunkDecoder::new(),
            framer: LineFramer::new(),
            content: String::new(),
            fragments: 0,
            dropped_lines: 0,
            lines: 0,
            options,
        }
    }

    /// Text accumulated so far (untrimmed).
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of fragments appended so far.
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Number of malformed `data:` lines dropped so far.
    pub fn dropped_lines(&self) -> usize {
        self.dropped_lines
    }

    /// Decode one transport chunk and process every line it completes.
    pub fn push_chunk(&mut self, chunk: &[u8]) {
        let mut text = String::with_capacity(chunk.len());
        self.decoder.decode_into(chunk, &mut text);
        self.framer.push_str(&text);

        for line in self.framer.take_lines() {
            self.process_line(&line);
        }
    }

    /// Flush buffered bytes and the unterminated last line, then summarize.
    pub fn finish(mut self) -> StreamSummary {
        let mut tail = String::new();
        self.decoder.finish(&mut tail);
        self.framer.push_str(&tail);

        for line in self.framer.finish() {
            self.process_line(&line);
        }

        if self.dropped_lines > 0 {
            warn!(
                dropped_lines = self.dropped_lines,
                fragments = self.fragments,
                "Stream finished with malformed data lines"
            );
        }

        StreamSummary {
            content: self.content.trim().to_string(),
            fragments: self.fragments,
            dropped_lines: self.dropped_lines,
            lines: self.lines,
        }
    }

    fn process_line(&mut self, raw: &str) {
        self.lines += 1;

        match classify_line(raw) {
            StreamLine::Data(payload) => match extract_delta(payload) {
                DeltaOutcome::Content(fragment) => self.append(&fragment),
                DeltaOutcome::NoContent => {}
                DeltaOutcome::Malformed => {
                    self.dropped_lines += 1;
                    debug!(
                        payload_len = payload.len(),
                        "Dropping data line with invalid JSON"
                    );
                }
            },
            StreamLine::Done => debug!("Received [DONE] sentinel"),
            StreamLine::Empty | StreamLine::Comment(_) | StreamLine::Other(_) => {}
        }
    }

    fn append(&mut self, fragment: &str) {
        self.content.push_str(fragment);
        self.fragments += 1;

        if let Some(on_progress) = self.options.on_progress.as_mut() {
            on_progress(fragment);
        }
        if let Some(on_chunk) = self.options.on_chunk.as_mut() {
            on_chunk(self.fragments);
        }
    }
}

impl fmt::Debug for StreamAccumulator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamAccumulator")
            .field("pending_bytes", &self.decoder.pending_len())
            .field("pending_line", &self.framer.pending())
            .field("fragments", &self.fragments)
            .field("dropped_lines", &self.dropped_lines)
            .field("lines", &self.lines)
            .field("options", &self.options)
            .finish()
    }
}

/// Decode an OpenAI-compatible delta stream and return the full text.
///
/// Reads one chunk at a time until the stream ends. An `Err` item from
/// `reader` is returned unchanged and ends the decode; malformed payloads
/// are skipped. Drop the returned future to cancel.
pub async fn parse_openai_stream<S, B, E>(
    reader: S,
    options: Option<ParseOptions<'_>>,
) -> Result<String, E>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    parse_openai_stream_with_summary(reader, options)
        .await
        .map(|summary| summary.content)
}

/// Same as [`parse_openai_stream`] but also reports fragment and drop counts.
pub async fn parse_openai_stream_with_summary<S, B, E>(
    mut reader: S,
    options: Option<ParseOptions<'_>>,
) -> Result<StreamSummary, E>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    let mut accumulator = StreamAccumulator::new(options.unwrap_or_default());

    while let Some(chunk) = reader.next().await {
        let chunk = chunk?;
        accumulator.push_chunk(chunk.as_ref());
    }

    Ok(accumulator.finish())
}

/// Decode a delta stream without callbacks.
pub async fn parse_sse_stream<S, B, E>(reader: S) -> Result<String, E>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    parse_openai_stream(reader, None).await
}

/// Decode a delta stream, reporting each fragment to `on_progress`.
pub async fn parse_sse_stream_with_progress<'a, S, B, E>(
    reader: S,
    on_progress: impl FnMut(&str) + Send + 'a,
) -> Result<String, E>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    parse_openai_stream(reader, Some(ParseOptions::new().with_on_progress(on_progress))).await
}
