//! Carry-over line buffering for chunked byte streams.

use memchr::memchr;

/// Splits incoming byte chunks into complete lines, preserving the trailing
/// partial line across chunk boundaries.
///
/// Lines are terminated by `\n`; a trailing `\r` is stripped. Completed
/// lines are decoded lossily, so a multi-byte UTF-8 character split across
/// chunks reassembles once its line completes.
#[derive(Debug, Default)]
pub(crate) struct LineSplitter {
    buffer: Vec<u8>,
}

impl LineSplitter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and drain every line it completes.
    pub(crate) fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(pos) = memchr(b'\n', &self.buffer[start..]) {
            let end = start + pos;
            lines.push(decode(&self.buffer[start..end]));
            start = end + 1;
        }

        // Remove processed bytes, keeping the unterminated tail
        if start > 0 {
            self.buffer.drain(..start);
        }
        lines
    }

    /// Take the unterminated tail as a final line. Called at end of input
    /// for streams that do not end with a newline.
    pub(crate) fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = decode(&self.buffer);
        self.buffer.clear();
        Some(line)
    }

    /// Discard any buffered bytes.
    pub(crate) fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Number of buffered bytes awaiting a line terminator.
    pub(crate) fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

fn decode(bytes: &[u8]) -> String {
    let bytes = match bytes.last() {
        Some(b'\r') => &bytes[..bytes.len() - 1],
        _ => bytes,
    };
    String::from_utf8_lossy(bytes).into_owned()
}
