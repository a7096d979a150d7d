//! IndexEntry model: one normalized key and the symbols filed under it.

use super::symbol_record::SymbolRecord;
use serde::{Deserialize, Serialize};

/// One normalized key and every declaration site sharing it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexEntry {
    /// Normalized search key, without the generator's `_N` suffix
    pub key: String,

    /// Generator's disambiguating suffix; also its emission order
    pub ordinal: u32,

    /// Literal name used as a group header (HTML entities decoded)
    pub display_label: String,

    /// Declaration sites in declaration order
    pub records: Vec<SymbolRecord>,
}

impl IndexEntry {
    /// Create a new entry.
    pub fn new(
        key: impl Into<String>,
        ordinal: u32,
        display_label: impl Into<String>,
        records: Vec<SymbolRecord>,
    ) -> Self {
        Self {
            key: key.into(),
            ordinal,
            display_label: display_label.into(),
            records,
        }
    }

    /// The key that is unique within a shard, as the generator writes it.
    pub fn unique_key(&self) -> String {
        format!("{}_{}", self.key, self.ordinal)
    }

    /// Sort order inside a shard.
    pub(crate) fn sort_key(&self) -> (&str, u32) {
        (self.key.as_str(), self.ordinal)
    }
}
