//! Append-only cache with insert-if-absent semantics.
//!
//! This module provides a thread-safe cache whose entries are added once and
//! never replaced or evicted. Concurrent writers racing on the same key agree
//! on a single winner, so readers never observe a value changing underneath
//! them.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

/// A cache entry with the time it was added.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: DateTime<Utc>,
}

/// A thread-safe, append-only cache.
///
/// The cache is cloned cheaply (uses Arc internally); clones share storage.
/// Entries live until [`clear`](Self::clear) is called or the last clone is
/// dropped.
///
/// # Memory Efficiency with Arc
///
/// For large values, wrap them in `Arc` to avoid cloning on every read:
/// ```ignore
/// let cache = AppendOnlyCache::<String, Arc<Shard>>::new();
/// let shard = cache.insert_if_absent("functions_3".to_string(), Arc::new(shard));
/// ```
#[derive(Clone)]
pub struct AppendOnlyCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    cache: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
}

impl<K, V> AppendOnlyCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a value unless the key is already present.
    ///
    /// Returns the value now stored under the key: `value` if this call won,
    /// otherwise the value inserted earlier.
    pub fn insert_if_absent(&self, key: K, value: V) -> V {
        if let Ok(mut cache) = self.cache.write() {
            let entry = cache.entry(key).or_insert_with(|| CacheEntry {
                value,
                inserted_at: Utc::now(),
            });
            return entry.value.clone();
        }

        value
    }

    /// Get a value from the cache.
    pub fn get(&self, key: &K) -> Option<V> {
        if let Ok(cache) = self.cache.read() {
            return cache.get(key).map(|entry| entry.value.clone());
        }

        None
    }

    /// When the value under `key` was added.
    pub fn inserted_at(&self, key: &K) -> Option<DateTime<Utc>> {
        if let Ok(cache) = self.cache.read() {
            return cache.get(key).map(|entry| entry.inserted_at);
        }

        None
    }

    /// Check if a key exists in the cache.
    pub fn contains_key(&self, key: &K) -> bool {
        if let Ok(cache) = self.cache.read() {
            cache.contains_key(key)
        } else {
            false
        }
    }

    /// Snapshot of the cached keys.
    pub fn keys(&self) -> Vec<K> {
        if let Ok(cache) = self.cache.read() {
            cache.keys().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Count cached values matching a predicate.
    pub fn count_where(&self, predicate: impl Fn(&V) -> bool) -> usize {
        if let Ok(cache) = self.cache.read() {
            cache.values().filter(|entry| predicate(&entry.value)).count()
        } else {
            0
        }
    }

    /// Drop every entry. Only for session restarts.
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    /// Get the number of entries in the cache.
    pub fn len(&self) -> usize {
        if let Ok(cache) = self.cache.read() {
            cache.len()
        } else {
            0
        }
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> Default for AppendOnlyCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> std::fmt::Debug for AppendOnlyCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppendOnlyCache")
            .field("entries", &self.len())
            .finish()
    }
}
