use async_trait::async_trait;
use doxsearch::domain::ShardKey;
use doxsearch::error::{StoreError, StoreResult};
use doxsearch::source::{MemoryShardSource, ShardSource};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock shard source for testing.
///
/// Serves text from an in-memory source, counts fetches per shard, and can
/// be told to delay or fail individual shards.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockShardSource {
    inner: MemoryShardSource,
    fetch_counts: Arc<Mutex<HashMap<String, usize>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

#[allow(dead_code)]
impl MockShardSource {
    /// Create a mock serving `inner`.
    pub fn new(inner: MemoryShardSource) -> Self {
        Self {
            inner,
            fetch_counts: Arc::new(Mutex::new(HashMap::new())),
            delays: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Delay every fetch of `shard`.
    pub fn delay(&self, shard: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(shard.to_string(), delay);
    }

    /// Make fetches of `shard` fail with a transport error until `recover`.
    pub fn fail(&self, shard: &str) {
        self.failing.lock().unwrap().insert(shard.to_string());
    }

    /// Let fetches of `shard` succeed again.
    pub fn recover(&self, shard: &str) {
        self.failing.lock().unwrap().remove(shard);
    }

    /// Number of times `shard` (or `"manifest"`) was fetched.
    pub fn fetch_count(&self, shard: &str) -> usize {
        *self.fetch_counts.lock().unwrap().get(shard).unwrap_or(&0)
    }

    /// Total shard fetches, manifest excluded.
    pub fn total_shard_fetches(&self) -> usize {
        self.fetch_counts
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name.as_str() != "manifest")
            .map(|(_, count)| count)
            .sum()
    }

    fn track_fetch(&self, name: &str) {
        let mut counts = self.fetch_counts.lock().unwrap();
        *counts.entry(name.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl ShardSource for MockShardSource {
    async fn fetch_manifest(&self) -> StoreResult<String> {
        self.track_fetch("manifest");
        self.inner.fetch_manifest().await
    }

    async fn fetch_shard(&self, key: &ShardKey) -> StoreResult<String> {
        let name = key.to_string();
        self.track_fetch(&name);

        let delay = self.delays.lock().unwrap().get(&name).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().unwrap().contains(&name) {
            return Err(StoreError::Transport {
                shard: name,
                message: "connection reset".to_string(),
            });
        }

        self.inner.fetch_shard(key).await
    }

    fn describe(&self) -> String {
        format!("mock {}", self.inner.describe())
    }
}
