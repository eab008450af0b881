use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::actions::Action;

/// Granularity used when sleeping on a [`CancelToken`].
const POLL_SLICE: Duration = Duration::from_millis(20);

/// Cooperative cancellation handle for a single query.
///
/// A token is bound to the generation that was current when it was issued.
/// Starting a newer query bumps the shared generation which cancels every
/// older token at once.
#[derive(Debug, Clone)]
pub struct CancelToken {
    current: Arc<AtomicU64>,
    generation: u64,
}

impl CancelToken {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        Self {
            current: Arc::new(AtomicU64::new(0)),
            generation: 0,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.current.load(Ordering::SeqCst) != self.generation
    }

    /// Sleep for `delay`, waking early if the token gets cancelled.
    ///
    /// Returns `true` when the caller should stop.
    pub fn wait(&self, delay: Duration) -> bool {
        let deadline = Instant::now() + delay;
        loop {
            if self.is_cancelled() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            thread::sleep(POLL_SLICE.min(deadline - now));
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Awaiting input.
    Idle,
    /// A query is in flight.
    Querying,
    /// Results are shown, awaiting an action or new input.
    Presenting,
}

/// Host-side bookkeeping for the query lifecycle.
#[derive(Debug)]
pub struct QuerySession {
    current: Arc<AtomicU64>,
    state: SessionState,
    results: Vec<Action>,
}

impl Default for QuerySession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuerySession {
    pub fn new() -> Self {
        Self {
            current: Arc::new(AtomicU64::new(0)),
            state: SessionState::Idle,
            results: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn results(&self) -> &[Action] {
        &self.results
    }

    /// React to new input. Any query still in flight is cancelled.
    ///
    /// Returns `None` for empty input, which never starts a query.
    pub fn begin(&mut self, input: &str) -> Option<CancelToken> {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        if input.trim().is_empty() {
            self.state = SessionState::Idle;
            self.results.clear();
            return None;
        }
        self.state = SessionState::Querying;
        Some(CancelToken {
            current: self.current.clone(),
            generation,
        })
    }

    /// Deliver results for `token`. Results of a superseded query are dropped.
    pub fn finish(&mut self, token: &CancelToken, results: Vec<Action>) -> bool {
        if token.is_cancelled() {
            tracing::debug!(generation = token.generation(), "dropping stale results");
            return false;
        }
        self.results = results;
        self.state = SessionState::Presenting;
        true
    }

    /// The query for `token` was given up before producing results.
    pub fn abandon(&mut self, token: &CancelToken) {
        if !token.is_cancelled() {
            self.current.fetch_add(1, Ordering::SeqCst);
            self.state = SessionState::Idle;
        }
    }
}
