//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for the identifiers that flow
//! between the shard store and the query engine: normalized search keys and
//! shard keys. Both are validated at construction time so an empty query or a
//! garbled shard name cannot reach the store.

pub mod errors;
pub mod search_key;
pub mod shard_key;

pub use errors::ValidationError;
pub use search_key::{normalize, SearchKey};
pub use shard_key::ShardKey;
