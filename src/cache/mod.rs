//! Caching utilities.
//!
//! This module provides the append-only cache the shard store keeps loaded
//! shards in.

pub mod append_only_cache;

pub use append_only_cache::AppendOnlyCache;
