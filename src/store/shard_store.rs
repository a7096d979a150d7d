//! Lazily populated, append-only store of parsed shards.

use crate::cache::AppendOnlyCache;
use crate::domain::ShardKey;
use crate::error::{StoreError, StoreResult};
use crate::format::{parse_manifest, parse_shard};
use crate::models::{IndexManifest, Shard};
use crate::observability::{LoadOutcome, MetricsTracker, Timer};
use crate::source::ShardSource;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Maximum concurrent fetches while prefetching a category.
const PREFETCH_CONCURRENCY: usize = 8;

/// What the store remembers about a shard key.
///
/// Missing and malformed shards are remembered too, so a caller evaluating
/// every keystroke neither refetches them nor repeats their diagnostics.
#[derive(Debug, Clone)]
pub enum CachedShard {
    /// Parsed and validated
    Loaded(Arc<Shard>),
    /// No shard was generated for this key
    Missing,
    /// Fetched but rejected; holds the reason
    Malformed(String),
}

impl CachedShard {
    fn into_result(self, key: &ShardKey) -> StoreResult<Arc<Shard>> {
        match self {
            Self::Loaded(shard) => Ok(shard),
            Self::Missing => Err(StoreError::ShardNotFound(key.to_string())),
            Self::Malformed(reason) => Err(StoreError::MalformedShard {
                shard: key.to_string(),
                reason,
            }),
        }
    }

    /// Whether this slot holds a usable shard.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Process-wide shard cache keyed by shard key.
pub type ShardCache = AppendOnlyCache<ShardKey, CachedShard>;

/// Store of shards fetched from one source.
///
/// The manifest is fetched on first use and kept once it parses; shards are
/// fetched on first use and kept forever (see [`CachedShard`]). Concurrent
/// loads of the same key may both fetch, but only the first result is kept
/// and both callers see it.
pub struct ShardStore {
    source: Arc<dyn ShardSource>,
    manifest: OnceCell<Arc<IndexManifest>>,
    cache: ShardCache,
    metrics: MetricsTracker,
}

impl ShardStore {
    /// Create a store over a source; nothing is fetched yet.
    pub fn new(source: Arc<dyn ShardSource>) -> Self {
        Self {
            source,
            manifest: OnceCell::new(),
            cache: ShardCache::new(),
            metrics: MetricsTracker::new(),
        }
    }

    /// Create a store whose manifest is already known.
    pub fn with_manifest(source: Arc<dyn ShardSource>, manifest: IndexManifest) -> Self {
        Self {
            manifest: OnceCell::new_with(Some(Arc::new(manifest))),
            ..Self::new(source)
        }
    }

    /// Report into a shared metrics tracker.
    pub fn with_metrics(mut self, metrics: MetricsTracker) -> Self {
        self.metrics = metrics;
        self
    }

    /// The metrics this store reports into.
    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    /// The shard cache.
    pub fn cache(&self) -> &ShardCache {
        &self.cache
    }

    /// When the outcome for `key` entered the cache, if it has.
    pub fn cached_since(&self, key: &ShardKey) -> Option<DateTime<Utc>> {
        self.cache.inserted_at(key)
    }

    /// Description of the underlying source.
    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// The index manifest, fetched on first call.
    ///
    /// A failed fetch or parse is not remembered; the next call retries.
    pub async fn manifest(&self) -> StoreResult<Arc<IndexManifest>> {
        self.manifest
            .get_or_try_init(|| async {
                let text = self.source.fetch_manifest().await?;
                let manifest = parse_manifest(&text).map_err(|e| {
                    tracing::warn!(source = %self.source.describe(), error = %e, "Malformed search index manifest");
                    StoreError::ManifestUnavailable(e.to_string())
                })?;

                tracing::info!(
                    source = %self.source.describe(),
                    categories = manifest.categories().len(),
                    "Loaded search index manifest"
                );
                Ok(Arc::new(manifest))
            })
            .await
            .cloned()
    }

    /// Load one shard, from the cache when possible.
    ///
    /// # Errors
    ///
    /// - `StoreError::ShardNotFound` when no shard was generated for the key
    /// - `StoreError::MalformedShard` when the shard failed validation
    /// - `StoreError::Transport` / `StoreError::Io` when the fetch failed;
    ///   these are not cached
    pub async fn load_shard(&self, key: &ShardKey) -> StoreResult<Arc<Shard>> {
        let shard_name = key.to_string();

        if let Some(cached) = self.cache.get(key) {
            self.metrics.track_cache_access(&shard_name, true);
            if let Some(cached_at) = self.cached_since(key) {
                tracing::trace!(
                    shard = %shard_name,
                    cached_at = %cached_at.to_rfc3339(),
                    loaded = cached.is_loaded(),
                    "Serving shard from cache"
                );
            }
            return cached.into_result(key);
        }
        self.metrics.track_cache_access(&shard_name, false);

        let timer = Timer::new(format!("load {}", shard_name));
        let slot = match self.source.fetch_shard(key).await {
            Ok(text) => match parse_shard(&text) {
                Ok(shard) => {
                    tracing::info!(
                        shard = %shard_name,
                        entries = shard.len(),
                        records = shard.record_count(),
                        "Loaded shard"
                    );
                    CachedShard::Loaded(Arc::new(shard))
                }
                Err(e) => {
                    tracing::warn!(shard = %shard_name, error = %e, "Skipping malformed shard");
                    CachedShard::Malformed(e.to_string())
                }
            },
            Err(StoreError::ShardNotFound(_)) => {
                tracing::debug!(shard = %shard_name, "No shard generated for bucket");
                CachedShard::Missing
            }
            Err(StoreError::MalformedShard { reason, .. }) => {
                tracing::warn!(shard = %shard_name, error = %reason, "Skipping malformed shard");
                CachedShard::Malformed(reason)
            }
            Err(e) => {
                tracing::warn!(shard = %shard_name, error = %e, "Shard fetch failed");
                timer.finish();
                return Err(e);
            }
        };

        let outcome = match &slot {
            CachedShard::Loaded(_) => LoadOutcome::Loaded,
            CachedShard::Missing => LoadOutcome::Missing,
            CachedShard::Malformed(_) => LoadOutcome::Malformed,
        };
        self.metrics
            .track_shard_load(&shard_name, timer.finish(), outcome);

        self.cache.insert_if_absent(key.clone(), slot).into_result(key)
    }

    /// Load several shards concurrently; results are in input order.
    pub async fn load_many(&self, keys: &[ShardKey]) -> Vec<StoreResult<Arc<Shard>>> {
        join_all(keys.iter().map(|key| self.load_shard(key))).await
    }

    /// Load every shard of a category with bounded concurrency.
    ///
    /// Returns the number of shards now loaded for the category.
    pub async fn prefetch(&self, category: &str) -> StoreResult<usize> {
        let manifest = self.manifest().await?;
        let keys = manifest
            .category(category)
            .map(|c| c.all_shards())
            .unwrap_or_default();

        let loaded = stream::iter(keys.iter())
            .map(|key| self.load_shard(key))
            .buffer_unordered(PREFETCH_CONCURRENCY)
            .filter(|result| futures::future::ready(result.is_ok()))
            .count()
            .await;

        tracing::info!(category = %category, shards = loaded, "Prefetched category");
        Ok(loaded)
    }

    /// Number of shards held in parsed form.
    pub fn loaded_shard_count(&self) -> usize {
        self.cache.count_where(CachedShard::is_loaded)
    }

    /// Forget every cached shard. For session restarts only.
    pub fn reset(&self) {
        self.cache.clear();
    }
}

impl std::fmt::Debug for ShardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardStore")
            .field("source", &self.source.describe())
            .field("manifest_loaded", &self.manifest.initialized())
            .field("cache", &self.cache)
            .finish()
    }
}
