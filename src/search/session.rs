//! Keystroke-driven query session.
//!
//! A session turns a stream of query texts into a stream of displayed
//! outcomes. Every keystroke starts a new evaluation and supersedes the one
//! in flight; an evaluation's outcome is applied only while its generation
//! is still the latest, so a slow, stale evaluation can never overwrite a
//! fresher result.

use super::engine::QueryEngine;
use super::outcome::QueryOutcome;
use crate::error::{QueryError, QueryResult};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Where a session is in its keystroke cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No query text
    Idle,

    /// An evaluation for the latest text is in flight
    Typing,

    /// The displayed outcome belongs to the latest text
    Resolved,
}

/// What a session currently displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Keystroke generation this snapshot belongs to
    pub generation: u64,

    /// Session state
    pub state: SessionState,

    /// Latest query text
    pub query: String,

    /// Displayed outcome; while typing, the last resolved one
    pub outcome: Arc<QueryOutcome>,
}

impl SessionSnapshot {
    fn idle(generation: u64) -> Self {
        Self {
            generation,
            state: SessionState::Idle,
            query: String::new(),
            outcome: Arc::new(QueryOutcome::Idle),
        }
    }
}

/// One search box's session over a query engine.
pub struct QuerySession {
    engine: Arc<QueryEngine>,
    generation: AtomicU64,
    in_flight: Mutex<Option<JoinHandle<()>>>,
    display: watch::Sender<SessionSnapshot>,
}

impl QuerySession {
    /// Create an idle session.
    pub fn new(engine: Arc<QueryEngine>) -> Self {
        let (display, _) = watch::channel(SessionSnapshot::idle(0));
        Self {
            engine,
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
            display,
        }
    }

    /// The engine this session evaluates with.
    pub fn engine(&self) -> &Arc<QueryEngine> {
        &self.engine
    }

    /// Latest keystroke generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.display.borrow().state
    }

    /// What the session currently displays.
    pub fn current(&self) -> SessionSnapshot {
        self.display.borrow().clone()
    }

    /// Watch displayed snapshots.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.display.subscribe()
    }

    /// Handle a keystroke: supersede the evaluation in flight and start one
    /// for `text` in the background.
    ///
    /// Returns the keystroke's generation. Must be called from within a
    /// Tokio runtime.
    pub fn submit(self: &Arc<Self>, text: impl Into<String>) -> u64 {
        let text = text.into();
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let generation = self.begin(&text, in_flight.take());

        if text.trim().is_empty() {
            return generation;
        }

        let session = Arc::clone(self);
        *in_flight = Some(tokio::spawn(async move {
            let outcome = session.engine.evaluate(&text).await;
            if let Err(e) = session.apply(generation, &text, outcome) {
                tracing::trace!(generation = generation, error = %e, "Discarded stale outcome");
            }
        }));

        generation
    }

    /// Handle a keystroke and evaluate it inline.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Cancelled` when another keystroke arrived before
    /// the evaluation finished; its outcome is then discarded.
    pub async fn evaluate_now(&self, text: &str) -> QueryResult<Arc<QueryOutcome>> {
        let generation = {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            self.begin(text, in_flight.take())
        };

        if text.trim().is_empty() {
            return Ok(Arc::new(QueryOutcome::Idle));
        }

        let outcome = self.engine.evaluate(text).await;
        self.apply(generation, text, outcome)
    }

    /// Clear the query text and return to idle.
    pub fn clear(&self) -> u64 {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        self.begin("", in_flight.take())
    }

    /// Start a new generation for `text`, superseding `previous`.
    fn begin(&self, text: &str, previous: Option<JoinHandle<()>>) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(handle) = previous {
            if !handle.is_finished() {
                handle.abort();
                self.engine.store().metrics().track_cancellation();
                tracing::trace!(superseded_by = generation, "Cancelled in-flight evaluation");
            }
        }

        self.display.send_modify(|snapshot| {
            if text.trim().is_empty() {
                *snapshot = SessionSnapshot::idle(generation);
            } else {
                snapshot.generation = generation;
                snapshot.state = SessionState::Typing;
                snapshot.query = text.to_string();
            }
        });

        generation
    }

    /// Display `outcome` if `generation` is still the latest.
    fn apply(
        &self,
        generation: u64,
        text: &str,
        outcome: QueryOutcome,
    ) -> QueryResult<Arc<QueryOutcome>> {
        let outcome = Arc::new(outcome);
        let mut applied = false;

        self.display.send_if_modified(|snapshot| {
            if self.generation.load(Ordering::SeqCst) != generation
                || snapshot.generation != generation
            {
                return false;
            }
            *snapshot = SessionSnapshot {
                generation,
                state: SessionState::Resolved,
                query: text.to_string(),
                outcome: Arc::clone(&outcome),
            };
            applied = true;
            true
        });

        if applied {
            Ok(outcome)
        } else {
            self.engine.store().metrics().track_cancellation();
            Err(QueryError::Cancelled {
                superseded_by: self.generation(),
            })
        }
    }
}

impl std::fmt::Debug for QuerySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuerySession")
            .field("generation", &self.generation())
            .field("state", &self.state())
            .finish()
    }
}
