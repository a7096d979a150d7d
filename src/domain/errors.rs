//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The query normalizes to nothing.
    EmptyQuery,

    /// The shard key does not have the `<category>_<position>` form.
    InvalidShardKey(String),

    /// A category name is empty or contains characters not allowed in file names.
    InvalidCategory(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQuery => write!(f, "Query cannot be empty"),
            Self::InvalidShardKey(key) => write!(f, "Invalid shard key: {}", key),
            Self::InvalidCategory(name) => write!(f, "Invalid category name: {}", name),
        }
    }
}

impl std::error::Error for ValidationError {}
