//! Search metrics tracking.
//!
//! This module provides counters for monitoring how the shard store and query
//! engine behave under per-keystroke load.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared metrics tracker; clones share counters.
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    queries_total: Arc<AtomicU64>,
    evaluations_cancelled_total: Arc<AtomicU64>,
    shard_loads_total: Arc<AtomicU64>,
    shards_missing_total: Arc<AtomicU64>,
    shards_malformed_total: Arc<AtomicU64>,
    cache_hits_total: Arc<AtomicU64>,
    cache_misses_total: Arc<AtomicU64>,
}

impl MetricsTracker {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            queries_total: Arc::new(AtomicU64::new(0)),
            evaluations_cancelled_total: Arc::new(AtomicU64::new(0)),
            shard_loads_total: Arc::new(AtomicU64::new(0)),
            shards_missing_total: Arc::new(AtomicU64::new(0)),
            shards_malformed_total: Arc::new(AtomicU64::new(0)),
            cache_hits_total: Arc::new(AtomicU64::new(0)),
            cache_misses_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track a completed query evaluation.
    pub fn track_query(&self, duration_ms: u128, result_count: usize, truncated: bool) {
        self.queries_total.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            duration_ms = duration_ms,
            result_count = result_count,
            truncated = truncated,
            "Query evaluated"
        );
    }

    /// Track an evaluation discarded because a newer keystroke arrived.
    pub fn track_cancellation(&self) {
        self.evaluations_cancelled_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Track a shard cache access.
    pub fn track_cache_access(&self, shard: &str, hit: bool) {
        if hit {
            self.cache_hits_total.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(shard = %shard, "Shard cache hit");
        } else {
            self.cache_misses_total.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(shard = %shard, "Shard cache miss");
        }
    }

    /// Track the outcome of fetching a shard from its source.
    pub fn track_shard_load(&self, shard: &str, duration_ms: u128, outcome: LoadOutcome) {
        self.shard_loads_total.fetch_add(1, Ordering::Relaxed);

        match outcome {
            LoadOutcome::Loaded => {}
            LoadOutcome::Missing => {
                self.shards_missing_total.fetch_add(1, Ordering::Relaxed);
            }
            LoadOutcome::Malformed => {
                self.shards_malformed_total.fetch_add(1, Ordering::Relaxed);
            }
        }

        tracing::debug!(
            shard = %shard,
            duration_ms = duration_ms,
            outcome = ?outcome,
            "Shard fetch completed"
        );
    }

    /// Get the total number of evaluated queries.
    pub fn queries_total(&self) -> u64 {
        self.queries_total.load(Ordering::Relaxed)
    }

    /// Get the total number of cancelled evaluations.
    pub fn evaluations_cancelled_total(&self) -> u64 {
        self.evaluations_cancelled_total.load(Ordering::Relaxed)
    }

    /// Get the total number of shard fetches.
    pub fn shard_loads_total(&self) -> u64 {
        self.shard_loads_total.load(Ordering::Relaxed)
    }

    /// Get the total number of fetches for shards that do not exist.
    pub fn shards_missing_total(&self) -> u64 {
        self.shards_missing_total.load(Ordering::Relaxed)
    }

    /// Get the total number of shards rejected as malformed.
    pub fn shards_malformed_total(&self) -> u64 {
        self.shards_malformed_total.load(Ordering::Relaxed)
    }

    /// Get the total number of cache hits.
    pub fn cache_hits_total(&self) -> u64 {
        self.cache_hits_total.load(Ordering::Relaxed)
    }

    /// Get the total number of cache misses.
    pub fn cache_misses_total(&self) -> u64 {
        self.cache_misses_total.load(Ordering::Relaxed)
    }

    /// Get the cache hit rate (0.0 to 1.0).
    pub fn cache_hit_rate(&self) -> f64 {
        let hits = self.cache_hits_total() as f64;
        let total = (self.cache_hits_total() + self.cache_misses_total()) as f64;

        if total == 0.0 {
            0.0
        } else {
            hits / total
        }
    }

    /// Print a summary of all metrics.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             Queries: {}\n\
             Cancelled Evaluations: {}\n\
             Shard Fetches: {}\n\
             Missing Shards: {}\n\
             Malformed Shards: {}\n\
             Cache Hits: {}\n\
             Cache Misses: {}\n\
             Cache Hit Rate: {:.2}%",
            self.queries_total(),
            self.evaluations_cancelled_total(),
            self.shard_loads_total(),
            self.shards_missing_total(),
            self.shards_malformed_total(),
            self.cache_hits_total(),
            self.cache_misses_total(),
            self.cache_hit_rate() * 100.0,
        )
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of fetching one shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Missing,
    Malformed,
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }

    /// Elapsed time so far in milliseconds.
    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }

    /// Finish the timer and return the elapsed time in milliseconds.
    pub fn finish(self) -> u128 {
        let duration_ms = self.elapsed_ms();

        tracing::trace!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );

        duration_ms
    }
}
