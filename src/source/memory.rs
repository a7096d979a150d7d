use super::{ShardSource, MANIFEST_FILE};
use crate::domain::ShardKey;
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;

/// Shard source backed by text held in memory.
///
/// Useful for hosts that embed an index in the binary, and for tests.
///
/// ```
/// use doxsearch::source::MemoryShardSource;
///
/// let source = MemoryShardSource::new()
///     .with_manifest("var indexSectionsWithContent={0:'t'}; var indexSectionNames={0:'all'};")
///     .with_shard("all_0", "var searchData=[];");
/// assert_eq!(source.shard_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryShardSource {
    manifest: Option<String>,
    shards: HashMap<String, String>,
}

impl MemoryShardSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the manifest text.
    pub fn with_manifest(mut self, text: impl Into<String>) -> Self {
        self.manifest = Some(text.into());
        self
    }

    /// Add a shard under its rendered key (e.g. `functions_13`).
    pub fn with_shard(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.shards.insert(key.into(), text.into());
        self
    }

    /// Number of shards held.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }
}

#[async_trait]
impl ShardSource for MemoryShardSource {
    async fn fetch_manifest(&self) -> StoreResult<String> {
        self.manifest
            .clone()
            .ok_or_else(|| StoreError::ManifestUnavailable(format!("no {} in memory", MANIFEST_FILE)))
    }

    async fn fetch_shard(&self, key: &ShardKey) -> StoreResult<String> {
        let key = key.to_string();
        self.shards
            .get(&key)
            .cloned()
            .ok_or(StoreError::ShardNotFound(key))
    }

    fn describe(&self) -> String {
        format!("memory ({} shards)", self.shards.len())
    }
}
