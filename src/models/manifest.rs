//! Index manifest: which categories exist and which buckets have shards.

use crate::domain::{SearchKey, ShardKey, ValidationError};
use serde::{Deserialize, Serialize};

/// Category holding every symbol kind, searched when the scope is "everything".
pub const ALL_CATEGORY: &str = "all";

/// One searchable category (functions, classes, ...) and its buckets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryInfo {
    /// Generator's numeric id for the category
    pub id: usize,

    /// Category name; also the shard file prefix
    pub name: String,

    /// Human label for a category selector
    pub label: String,

    /// Buckets that have a shard, in shard-position order
    pub buckets: Vec<String>,
}

impl CategoryInfo {
    /// Create a category whose buckets are single characters.
    ///
    /// ```
    /// use doxsearch::models::CategoryInfo;
    ///
    /// let functions = CategoryInfo::with_bucket_chars(4, "functions", "Functions", "_abt~");
    /// assert_eq!(functions.buckets, vec!["_", "a", "b", "t", "~"]);
    /// ```
    pub fn with_bucket_chars(
        id: usize,
        name: impl Into<String>,
        label: impl Into<String>,
        bucket_chars: &str,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            label: label.into(),
            buckets: bucket_chars.chars().map(String::from).collect(),
        }
    }

    /// Shard key for the bucket at `position`.
    pub fn shard_key(&self, position: usize) -> Result<ShardKey, ValidationError> {
        ShardKey::new(self.name.as_str(), position)
    }

    /// Shard keys whose bucket could hold keys matching `query`.
    pub fn candidate_shards(&self, query: &SearchKey) -> Vec<ShardKey> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, bucket)| query.fits_bucket(bucket))
            .filter_map(|(position, _)| self.shard_key(position).ok())
            .collect()
    }

    /// Every shard key of this category.
    pub fn all_shards(&self) -> Vec<ShardKey> {
        (0..self.buckets.len())
            .filter_map(|position| self.shard_key(position).ok())
            .collect()
    }
}

/// The set of categories a generated index provides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexManifest {
    categories: Vec<CategoryInfo>,
}

impl IndexManifest {
    /// Create a manifest; categories are kept in id order.
    pub fn new(mut categories: Vec<CategoryInfo>) -> Self {
        categories.sort_by_key(|c| c.id);
        Self { categories }
    }

    /// All categories in id order.
    pub fn categories(&self) -> &[CategoryInfo] {
        &self.categories
    }

    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&CategoryInfo> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Whether the generator emitted a combined `all` category.
    pub fn has_all_category(&self) -> bool {
        self.category(ALL_CATEGORY).is_some()
    }

    /// Check if the manifest lists no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
