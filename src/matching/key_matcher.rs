//! Prefix and substring matching of normalized keys.
//!
//! Prefix mode is the search box's default: it only needs the shards whose
//! bucket fits the query and answers each one with a binary search.
//! Substring mode has to scan every shard of a category.

use crate::domain::{SearchKey, ShardKey};
use crate::models::{CategoryInfo, IndexEntry, Shard};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a query is compared against index keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Keys starting with the query
    #[default]
    Prefix,

    /// Keys containing the query anywhere
    Substring,
}

impl MatchMode {
    /// Shards of `category` that may hold matches for `query`.
    pub fn candidate_shards(&self, category: &CategoryInfo, query: &SearchKey) -> Vec<ShardKey> {
        match self {
            Self::Prefix => category.candidate_shards(query),
            Self::Substring => category.all_shards(),
        }
    }

    /// Whether `key` matches `query` in this mode.
    pub fn matches(&self, key: &str, query: &SearchKey) -> bool {
        match self {
            Self::Prefix => key.starts_with(query.as_str()),
            Self::Substring => contains_on_token_boundary(key, query.as_str()),
        }
    }
}

/// Whether `needle` occurs in `key` starting on a token boundary.
///
/// Keys are normalized, so a `_` always opens a three-byte `_xx` escape.
/// Offsets inside an escape are skipped: `5f` never matches `to_5fstring`.
fn contains_on_token_boundary(key: &str, needle: &str) -> bool {
    let mut offset = 0;
    while offset < key.len() {
        let rest = &key[offset..];
        if rest.starts_with(needle) {
            return true;
        }
        offset += if rest.starts_with('_') {
            3
        } else {
            rest.chars().next().map_or(1, char::len_utf8)
        };
        while offset < key.len() && !key.is_char_boundary(offset) {
            offset += 1;
        }
    }
    false
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix" => Ok(Self::Prefix),
            "substring" => Ok(Self::Substring),
            other => Err(format!(
                "unknown match mode '{}' (expected 'prefix' or 'substring')",
                other
            )),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix => write!(f, "prefix"),
            Self::Substring => write!(f, "substring"),
        }
    }
}

/// How an entry's key relates to the query.
///
/// Ordered by rank: exact matches sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchType {
    /// Key equals the query
    ExactKey,

    /// Key starts with the query
    Prefix,

    /// Key contains the query elsewhere
    Substring,
}

impl MatchType {
    fn classify(key: &str, query: &SearchKey) -> Self {
        if key == query.as_str() {
            Self::ExactKey
        } else if key.starts_with(query.as_str()) {
            Self::Prefix
        } else {
            Self::Substring
        }
    }
}

/// An entry matched by a query.
#[derive(Debug, Clone, Copy)]
pub struct KeyMatch<'a> {
    /// The matching entry
    pub entry: &'a IndexEntry,

    /// How it matched
    pub match_type: MatchType,
}

/// Find the entries of `shard` matching `query`, in shard order.
pub fn find_matches<'a>(shard: &'a Shard, query: &SearchKey, mode: MatchMode) -> Vec<KeyMatch<'a>> {
    let classify = |entry: &'a IndexEntry| KeyMatch {
        entry,
        match_type: MatchType::classify(&entry.key, query),
    };

    match mode {
        MatchMode::Prefix => shard.prefix_range(query.as_str()).iter().map(classify).collect(),
        MatchMode::Substring => shard
            .entries()
            .iter()
            .filter(|entry| mode.matches(&entry.key, query))
            .map(classify)
            .collect(),
    }
}
