//! Incremental UTF-8 decoding of transport chunks.
//!
//! Chunk boundaries are chosen by the transport, so a multi-byte character
//! can arrive split across two reads. The decoder keeps the incomplete tail
//! of a chunk until the bytes that complete it show up. A byte order mark
//! at the very start of the stream is dropped.

/// Replacement emitted for byte sequences that can never become valid UTF-8.
const REPLACEMENT: char = '\u{FFFD}';

/// Byte order mark, dropped once if it opens the stream.
const BOM: char = '\u{FEFF}';

/// Streaming UTF-8 decoder.
///
/// Invalid sequences decode to U+FFFD instead of failing, matching what a
/// non-fatal text decoder does for a live response body.
#[derive(Debug, Default)]
pub struct Utf8ChunkDecoder {
    /// Bytes of a character whose remaining bytes have not arrived yet
    pending: Vec<u8>,
    /// Set once the first character of the stream has been decoded
    started: bool,
}

impl Utf8ChunkDecoder {
    /// Create a decoder with no pending bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes held back waiting for the rest of a character.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Decode `chunk`, appending the decoded text to `out`.
    ///
    /// A trailing incomplete sequence is held back and completed by the next
    /// call (or flushed by [`finish`](Self::finish)).
    pub fn decode_into(&mut self, chunk: &[u8], out: &mut String) {
        let start = out.len();

        if self.pending.is_empty() {
            let rest = decode_valid_prefix(chunk, out);
            self.pending.extend_from_slice(rest);
        } else {
            self.pending.extend_from_slice(chunk);
            let bytes = std::mem::take(&mut self.pending);
            let rest = decode_valid_prefix(&bytes, out);
            self.pending.extend_from_slice(rest);
        }

        if !self.started && out.len() > start {
            self.started = true;
            if out[start..].starts_with(BOM) {
                out.replace_range(start..start + BOM.len_utf8(), "");
            }
        }
    }

    /// Decode `chunk` into a freshly allocated string.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut out = String::with_capacity(chunk.len());
        self.decode_into(chunk, &mut out);
        out
    }

    /// Flush the decoder at end of stream.
    ///
    /// A sequence that never completed becomes a single U+FFFD.
    pub fn finish(&mut self, out: &mut String) {
        if !self.pending.is_empty() {
            self.pending.clear();
            self.started = true;
            out.push(REPLACEMENT);
        }
    }
}

/// Decode as much of `bytes` as possible into `out`.
///
/// Returns the unconsumed suffix, which is always a prefix of a valid
/// multi-byte character (at most 3 bytes).
fn decode_valid_prefix<'a>(mut bytes: &'a [u8], out: &mut String) -> &'a [u8] {
    loop {
        match std::str::from_utf8(bytes) {
            Ok(text) => {
                out.push_str(text);
                return &[];
            }
            Err(e) => {
                let (valid, after) = bytes.split_at(e.valid_up_to());
                // from_utf8 has already validated this prefix
                if let Ok(text) = std::str::from_utf8(valid) {
                    out.push_str(text);
                }
                match e.error_len() {
                    Some(len) => {
                        out.push(REPLACEMENT);
                        bytes = &after[len..];
                    }
                    // Unexpected end of input: wait for more bytes
                    None => return after,
                }
            }
        }
    }
}
