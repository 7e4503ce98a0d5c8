//! Conversation state and the commit-on-completion stream adapter.

use futures_util::{Stream, StreamExt};
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use crate::types::Turn;
use crate::Error;

/// Append-only record of one conversation, seeded with a single system
/// directive. Owned by exactly one provider instance; discarding the
/// provider is the reset boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Start a conversation holding only the given system directive.
    pub fn with_system(directive: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(directive)],
        }
    }

    /// Append the user's message. Called before the request goes out, so a
    /// failed request keeps the user turn for the next attempt.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    /// Append a completed assistant response.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    /// All turns in conversation order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// A stream adapter that forwards text fragments unchanged while
/// accumulating them, and commits the accumulated text when the stream
/// completes.
///
/// The commit callback runs only when the underlying stream is exhausted
/// without an error and the accumulated text is non-empty. An error is
/// forwarded once and ends the stream with no commit; fragments already
/// yielded are never retracted.
pub struct CommitStream<S, F> {
    inner: S,
    accumulated: String,
    commit: Option<F>,
    finished: bool,
}

impl<S, F> CommitStream<S, F>
where
    F: FnOnce(String),
{
    pub fn new(inner: S, commit: F) -> Self {
        Self {
            inner,
            accumulated: String::new(),
            commit: Some(commit),
            finished: false,
        }
    }
}

impl<S, F> Stream for CommitStream<S, F>
where
    S: Stream<Item = Result<String, Error>> + Unpin,
    F: FnOnce(String) + Unpin,
{
    type Item = Result<String, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.finished {
            return Poll::Ready(None);
        }

        match ready!(self.inner.poll_next_unpin(cx)) {
            Some(Ok(fragment)) => {
                self.accumulated.push_str(&fragment);
                Poll::Ready(Some(Ok(fragment)))
            }
            Some(Err(e)) => {
                // No commit after an error; the user turn stays for the retry
                self.finished = true;
                self.commit = None;
                Poll::Ready(Some(Err(e)))
            }
            None => {
                self.finished = true;
                if let Some(commit) = self.commit.take() {
                    if !self.accumulated.is_empty() {
                        commit(std::mem::take(&mut self.accumulated));
                    }
                }
                Poll::Ready(None)
            }
        }
    }
}
