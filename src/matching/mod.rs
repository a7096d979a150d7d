//! Key matching for the query engine.
//!
//! This module selects candidate shards for a query and finds the index
//! entries whose normalized keys match it, by prefix or by substring.

pub mod key_matcher;

pub use key_matcher::{find_matches, KeyMatch, MatchMode, MatchType};
