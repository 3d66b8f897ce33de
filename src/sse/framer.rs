//! Newline framing over decoded text.

/// Splits decoded text into `\n`-terminated lines.
///
/// The text after the last newline is kept as the start of the next line.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: String,
    /// Length of the buffer prefix already known to contain no `\n`
    scanned: usize,
}

impl LineFramer {
    /// Create an empty framer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text received after the last newline.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Append decoded text to the line buffer.
    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Remove and return every complete line, without its `\n`.
    ///
    /// Only text pushed since the previous call is searched, so a long line
    /// arriving in many small pieces is scanned once.
    pub fn take_lines(&mut self) -> Vec<String> {
        let Some(offset) = self.buffer[self.scanned..].rfind('\n') else {
            self.scanned = self.buffer.len();
            return Vec::new();
        };
        let last_newline = self.scanned + offset;

        let rest = self.buffer.split_off(last_newline + 1);
        self.scanned = rest.len();
        let complete = std::mem::replace(&mut self.buffer, rest);
        complete[..last_newline]
            .split('\n')
            .map(str::to_string)
            .collect()
    }

    /// Drain the unterminated remainder at end of stream.
    ///
    /// The remainder is split on `\n` again so a producer that never sent
    /// a final newline still has every piece processed.
    pub fn finish(&mut self) -> Vec<String> {
        let rest = std::mem::take(&mut self.buffer);
        self.scanned = 0;
        if rest.is_empty() {
            return Vec::new();
        }
        rest.split('\n').map(str::to_string).collect()
    }
}
