//! Transport whose answers are scripted in advance.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::TransportError;
use crate::ports::transport::{Transport, TransportFuture, TransportReceipt};

/// A single call observed by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPost {
    /// Endpoint the payload was posted to.
    pub endpoint: String,
    /// Payload bytes as handed over.
    pub payload: Vec<u8>,
    /// Timeout requested by the caller.
    pub timeout: Duration,
}

/// Transport that records every post and answers from a queue.
///
/// Once the scripted answers run out every further post succeeds with 200.
#[derive(Default)]
pub struct ScriptedTransport {
    answers: Mutex<VecDeque<Result<TransportReceipt, TransportError>>>,
    posts: Mutex<Vec<RecordedPost>>,
}

impl ScriptedTransport {
    /// Creates a transport that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport answering each post with the next scripted result.
    #[must_use]
    pub fn with_answers(answers: Vec<Result<TransportReceipt, TransportError>>) -> Self {
        Self { answers: Mutex::new(answers.into()), posts: Mutex::default() }
    }

    /// Returns every post observed so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().expect("transport lock poisoned").clone()
    }
}

impl Transport for ScriptedTransport {
    fn post(&self, endpoint: &str, payload: Vec<u8>, timeout: Duration) -> TransportFuture<'_> {
        let post = RecordedPost { endpoint: endpoint.to_string(), payload, timeout };

        Box::pin(async move {
            self.posts.lock().expect("transport lock poisoned").push(post);
            let answer = self.answers.lock().expect("transport lock poisoned").pop_front();
            answer.unwrap_or(Ok(TransportReceipt { status: 200 }))
        })
    }
}
