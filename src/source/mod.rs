//! Shard sources: where shard and manifest text comes from.
//!
//! The store only needs "fetch shard by key"; transport is left to the
//! implementation. Sources return raw text and never parse it.

mod directory;
mod http;
mod memory;

pub use directory::DirectoryShardSource;
pub use http::{HttpShardClient, HttpShardSource};
pub use memory::MemoryShardSource;

use crate::domain::ShardKey;
use crate::error::StoreResult;
use async_trait::async_trait;

/// File name of the index manifest.
pub const MANIFEST_FILE: &str = "searchdata.js";

/// File name of a shard.
pub fn shard_file_name(key: &ShardKey) -> String {
    format!("{}.js", key)
}

/// Provider of raw manifest and shard text.
///
/// Implementations report a shard that was never generated as
/// `StoreError::ShardNotFound` and a missing manifest as
/// `StoreError::ManifestUnavailable`.
#[async_trait]
pub trait ShardSource: Send + Sync {
    /// Fetch the manifest text.
    async fn fetch_manifest(&self) -> StoreResult<String>;

    /// Fetch the text of one shard.
    async fn fetch_shard(&self, key: &ShardKey) -> StoreResult<String>;

    /// Short description for log lines.
    fn describe(&self) -> String;
}
