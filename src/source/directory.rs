use super::{shard_file_name, ShardSource, MANIFEST_FILE};
use crate::domain::ShardKey;
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Shard source reading a generated `search/` directory from disk.
#[derive(Debug, Clone)]
pub struct DirectoryShardSource {
    root: PathBuf,
}

impl DirectoryShardSource {
    /// Create a source rooted at the directory holding `searchdata.js`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this source reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ShardSource for DirectoryShardSource {
    async fn fetch_manifest(&self) -> StoreResult<String> {
        let path = self.root.join(MANIFEST_FILE);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::ManifestUnavailable(format!("{}: {}", path.display(), e)))
    }

    async fn fetch_shard(&self, key: &ShardKey) -> StoreResult<String> {
        let path = self.root.join(shard_file_name(key));
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::ShardNotFound(key.to_string()))
            }
            Err(e) => Err(StoreError::Io {
                shard: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}
