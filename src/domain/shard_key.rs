//! ShardKey value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifies one shard: a category plus the position of its bucket in the
/// category's bucket list.
///
/// Rendered as `<category>_<position>`, which is also the shard's file stem.
///
/// # Example
///
/// ```
/// use doxsearch::domain::ShardKey;
///
/// let key = ShardKey::parse("functions_13").unwrap();
/// assert_eq!(key.category(), "functions");
/// assert_eq!(key.position(), 13);
/// assert_eq!(key.to_string(), "functions_13");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShardKey {
    category: String,
    position: usize,
}

impl ShardKey {
    /// Create a shard key for a category and bucket position.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidCategory` if the category is empty or
    /// contains anything other than ASCII letters, digits and `_`.
    pub fn new(category: impl Into<String>, position: usize) -> Result<Self, ValidationError> {
        let category = category.into();
        if !Self::is_valid_category(&category) {
            return Err(ValidationError::InvalidCategory(category));
        }
        Ok(Self { category, position })
    }

    /// Parse a rendered shard key such as `functions_13`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let (category, position) = raw
            .rsplit_once('_')
            .ok_or_else(|| ValidationError::InvalidShardKey(raw.to_string()))?;
        let position = position
            .parse::<usize>()
            .map_err(|_| ValidationError::InvalidShardKey(raw.to_string()))?;
        Self::new(category, position)
            .map_err(|_| ValidationError::InvalidShardKey(raw.to_string()))
    }

    fn is_valid_category(category: &str) -> bool {
        !category.is_empty()
            && category
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// The category name.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The bucket position within the category.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Serialize for ShardKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ShardKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ShardKey::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ShardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.category, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shard_key_display() {
        let key = ShardKey::new("functions", 13).unwrap();
        assert_eq!(format!("{}", key), "functions_13");
    }

    #[test]
    fn test_shard_key_rejects_bad_category() {
        assert!(ShardKey::new("", 0).is_err());
        assert!(ShardKey::new("../etc", 0).is_err());
        assert!(ShardKey::new("all files", 0).is_err());
    }

    #[test]
    fn test_shard_key_parse() {
        let key = ShardKey::parse("enumvalues_4").unwrap();
        assert_eq!(key.category(), "enumvalues");
        assert_eq!(key.position(), 4);
    }

    #[test]
    fn test_shard_key_parse_rejects_malformed() {
        assert!(ShardKey::parse("functions").is_err());
        assert!(ShardKey::parse("functions_x").is_err());
        assert!(ShardKey::parse("_3").is_err());
    }

    #[test]
    fn test_shard_key_serialization() {
        let key = ShardKey::new("all", 2).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"all_2\"");

        let back: ShardKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
