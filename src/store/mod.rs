//! Index Shard Store.
//!
//! Gives the query engine partition-scoped access to shards without holding
//! the whole index in memory: shards are fetched from a [`ShardSource`]
//! on first use, parsed, validated, and kept for the lifetime of the store.
//!
//! [`ShardSource`]: crate::source::ShardSource

pub mod shard_store;

pub use shard_store::{CachedShard, ShardCache, ShardStore};
