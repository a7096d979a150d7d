//! Error types for doxsearch.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! None of these reach the user of a search box: the query layer folds every
//! store failure into a (possibly empty) outcome.

use thiserror::Error;

/// Errors that can occur while loading shards and manifests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No shard was generated for this key. Expected and silent.
    #[error("Shard not found: {0}")]
    ShardNotFound(String),

    /// A shard was fetched but failed structural validation
    #[error("Malformed shard {shard}: {reason}")]
    MalformedShard { shard: String, reason: String },

    /// The index manifest could not be loaded
    #[error("Search index manifest unavailable: {0}")]
    ManifestUnavailable(String),

    /// Remote fetch failed
    #[error("Transport error fetching {shard}: {message}")]
    Transport { shard: String, message: String },

    /// Local read failed
    #[error("I/O error reading {shard}: {message}")]
    Io { shard: String, message: String },
}

impl StoreError {
    /// Whether this failure should be remembered by the shard cache.
    ///
    /// Missing and malformed shards never change for the lifetime of an
    /// index; transport and I/O failures may.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::ShardNotFound(_) | Self::MalformedShard { .. }
        )
    }
}

/// Errors produced by the shard and manifest codecs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The literal could not be parsed
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// A value had the wrong shape
    #[error("Unexpected structure at {path}: {reason}")]
    Structure { path: String, reason: String },

    /// Two entries share a unique key
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// A required variable is absent from a script
    #[error("Missing variable: {0}")]
    MissingVariable(String),

    /// Structured JSON document failed to deserialize
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::Json(err.to_string())
    }
}

/// Errors that can occur during query evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A newer keystroke superseded this evaluation
    #[error("Query evaluation cancelled (superseded by generation {superseded_by})")]
    Cancelled { superseded_by: u64 },

    /// The engine has no usable index
    #[error("No search index available")]
    NoIndex,
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with FormatError
pub type FormatResult<T> = Result<T, FormatError>;

/// Convenience type alias for Results with QueryError
pub type QueryResult<T> = Result<T, QueryError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
