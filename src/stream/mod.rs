//! Stream adapter for decoding provider byte streams into text fragments.

mod json_array;
mod lines;
mod sse_delta;

use futures_util::{Stream, StreamExt};
use lines::LineSplitter;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use crate::Error;

/// Result of decoding one line of a provider stream.
#[derive(Debug, PartialEq)]
pub(crate) enum LineOutcome {
    /// A text fragment to yield.
    Fragment(String),
    /// Structural noise or an unparseable frame; drop it and keep going.
    Skip,
    /// Terminator sentinel; nothing further may be yielded.
    Done,
}

const MAX_BUFFER_SIZE: usize = 1_000_000;

/// A stream adapter that decodes provider byte chunks into text fragments.
/// Maintains internal state to handle frames split across chunks.
pub struct FragmentDecoder<S> {
    /// The underlying byte stream
    inner: S,
    /// Carry-over buffer holding the unterminated trailing line
    splitter: LineSplitter,
    /// Per-line decoder for the provider's wire format
    decode: fn(&str) -> LineOutcome,
    /// Decoded fragments ready to be yielded
    pending: VecDeque<String>,
    /// Set once the terminator sentinel is seen
    done: bool,
    /// Set once the underlying stream is exhausted or has failed
    finished: bool,
}

impl<S> FragmentDecoder<S> {
    /// Decode `data:`-prefixed SSE chat completion chunks. The `[DONE]`
    /// sentinel ends the stream; any carried-over bytes are discarded and
    /// nothing further is yielded.
    pub fn sse_delta(inner: S) -> Self {
        Self::new(inner, sse_delta::decode_line)
    }

    /// Decode newline-separated records of a streamed JSON array.
    pub fn json_array(inner: S) -> Self {
        Self::new(inner, json_array::decode_line)
    }

    fn new(inner: S, decode: fn(&str) -> LineOutcome) -> Self {
        Self {
            inner,
            splitter: LineSplitter::new(),
            decode,
            pending: VecDeque::new(),
            done: false,
            finished: false,
        }
    }

    /// Run completed lines through the decoder, queueing fragments.
    /// Lines after the terminator sentinel are not decoded.
    fn decode_lines(&mut self, lines: Vec<String>) {
        for line in lines {
            if self.done {
                return;
            }
            match (self.decode)(&line) {
                LineOutcome::Fragment(text) => self.pending.push_back(text),
                LineOutcome::Skip => {}
                LineOutcome::Done => {
                    self.done = true;
                    self.splitter.clear();
                }
            }
        }
    }
}

impl<S, E> Stream for FragmentDecoder<S>
where
    S: Stream<Item = Result<bytes::Bytes, E>> + Unpin,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    type Item = Result<String, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            // First, yield any already-decoded fragments (FIFO order)
            if let Some(fragment) = self.pending.pop_front() {
                return Poll::Ready(Some(Ok(fragment)));
            }

            if self.done || self.finished {
                return Poll::Ready(None);
            }

            let chunk = match ready!(self.inner.poll_next_unpin(cx)) {
                Some(Ok(chunk)) => chunk,
                Some(Err(e)) => {
                    self.finished = true;
                    return Poll::Ready(Some(Err(Error::streaming(format!(
                        "stream error: {}",
                        e.into()
                    )))));
                }
                None => {
                    // Stream ended - the unterminated tail is still a line
                    self.finished = true;
                    if let Some(tail) = self.splitter.finish() {
                        self.decode_lines(vec![tail]);
                    }
                    continue;
                }
            };

            let lines = self.splitter.push(&chunk);

            // Check buffer size limit
            if self.splitter.buffered() > MAX_BUFFER_SIZE {
                self.finished = true;
                self.splitter.clear();
                return Poll::Ready(Some(Err(Error::streaming(
                    "line buffer exceeded maximum size".to_string(),
                ))));
            }

            // Decode complete lines and continue loop
            self.decode_lines(lines);
        }
    }
}
