//! Data models for the search index.
//!
//! This module contains the structures a generated index is made of: symbol
//! records, the index entries grouping them under a normalized key, shards of
//! entries, and the manifest describing which shards exist.

pub mod index_entry;
pub mod manifest;
pub mod shard;
pub mod symbol_record;

pub use index_entry::IndexEntry;
pub use manifest::{CategoryInfo, IndexManifest, ALL_CATEGORY};
pub use shard::Shard;
pub use symbol_record::{derive_scope, SymbolRecord};
