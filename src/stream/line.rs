//! Stateful line buffering for chunked stream bodies.
//!
//! Transport chunks can end anywhere, including mid-line and mid-UTF-8
//! sequence. Buffering at the byte level and splitting only at `\n` keeps
//! both cases intact: a partial line (or partial multi-byte character) waits
//! in the buffer until its newline arrives, so the final output is invariant
//! under re-chunking.

/// Accumulates raw bytes and yields complete lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one transport chunk.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Pop the next complete line, without its `\n` (or `\r\n`) terminator.
    ///
    /// Invalid UTF-8 inside a complete line is replaced rather than dropped;
    /// the surrounding line still reaches the parser.
    pub fn next_line(&mut self) -> Option<String> {
        let pos = self.buf.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
        line.pop(); // the \n itself
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Take whatever remains after the stream closed, as a final
    /// unterminated line. Returns `None` if nothing is buffered.
    pub fn finish(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buf);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}
