//! Query engine and keystroke session.
//!
//! The engine normalizes query text, selects and loads candidate shards,
//! matches keys, then ranks, deduplicates and truncates the hits. The
//! session wraps it with the Idle/Typing/Resolved cycle of a search box.

pub mod engine;
pub mod outcome;
pub mod ranking;
pub mod session;

pub use engine::{EngineOptions, QueryEngine, SearchScope, DEFAULT_MAX_RESULTS};
pub use outcome::{QueryOutcome, ResultRow, ResultSet};
pub use ranking::Candidate;
pub use session::{QuerySession, SessionSnapshot, SessionState};
