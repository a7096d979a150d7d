//! Shard model: an immutable, key-sorted table of index entries.

use super::index_entry::IndexEntry;
use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One partition of the search index.
///
/// Entries are held sorted by `(key, ordinal)` so exact and prefix lookups
/// are binary searches. A shard is validated on construction and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawShard")]
pub struct Shard {
    entries: Vec<IndexEntry>,
}

#[derive(Deserialize)]
struct RawShard {
    entries: Vec<IndexEntry>,
}

impl TryFrom<RawShard> for Shard {
    type Error = FormatError;

    fn try_from(raw: RawShard) -> Result<Self, Self::Error> {
        Shard::new(raw.entries)
    }
}

impl Shard {
    /// Validate and sort a set of entries.
    ///
    /// # Errors
    ///
    /// - `FormatError::Structure` if an entry has an empty key or no records
    /// - `FormatError::DuplicateKey` if two entries share `key_ordinal`
    pub fn new(mut entries: Vec<IndexEntry>) -> Result<Self, FormatError> {
        Self::validate(&entries)?;
        entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Ok(Self { entries })
    }

    fn validate(entries: &[IndexEntry]) -> Result<(), FormatError> {
        let mut seen = HashSet::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            if entry.key.is_empty() {
                return Err(FormatError::Structure {
                    path: format!("entry {}", idx),
                    reason: "empty key".to_string(),
                });
            }
            if entry.records.is_empty() {
                return Err(FormatError::Structure {
                    path: format!("entry {} ({})", idx, entry.unique_key()),
                    reason: "no symbol records".to_string(),
                });
            }
            if !seen.insert((entry.key.as_str(), entry.ordinal)) {
                return Err(FormatError::DuplicateKey(entry.unique_key()));
            }
        }
        Ok(())
    }

    /// An empty shard.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// All entries in key order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the shard has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of symbol records across all entries.
    pub fn record_count(&self) -> usize {
        self.entries.iter().map(|e| e.records.len()).sum()
    }

    /// Find the entry for a normalized key (lowest ordinal when several raw
    /// names share it). O(log n).
    pub fn lookup_exact(&self, key: &str) -> Option<&IndexEntry> {
        self.entries_with_key(key).first()
    }

    /// Every entry whose key equals `key`, in ordinal order.
    pub fn entries_with_key(&self, key: &str) -> &[IndexEntry] {
        let start = self.entries.partition_point(|e| e.key.as_str() < key);
        let len = self.entries[start..].partition_point(|e| e.key == key);
        &self.entries[start..start + len]
    }

    /// The contiguous run of entries whose key starts with `prefix`.
    pub fn prefix_range(&self, prefix: &str) -> &[IndexEntry] {
        let start = self.entries.partition_point(|e| e.key.as_str() < prefix);
        let len = self.entries[start..].partition_point(|e| e.key.starts_with(prefix));
        &self.entries[start..start + len]
    }
}
