//! Test fixtures: a small generated search directory.
//!
//! `search/` holds a manifest with `classes` and `functions` categories,
//! the real `functions_13.js` shard of a generated documentation set, a
//! `classes_13.js` shard, and a malformed `functions_12.js` shard.

#![allow(dead_code)]

use doxsearch::source::MemoryShardSource;
use doxsearch::{EngineOptions, QueryEngine, SearchScope, ShardSource, ShardStore};
use std::path::PathBuf;
use std::sync::Arc;

pub const MANIFEST: &str = include_str!("search/searchdata.js");
pub const FUNCTIONS_T: &str = include_str!("search/functions_13.js");
pub const CLASSES_T: &str = include_str!("search/classes_13.js");
pub const FUNCTIONS_S_MALFORMED: &str = include_str!("search/functions_12.js");

/// Path of the fixture search directory.
pub fn search_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("search")
}

/// The fixture directory as an in-memory source.
pub fn memory_source() -> MemoryShardSource {
    MemoryShardSource::new()
        .with_manifest(MANIFEST)
        .with_shard("functions_13", FUNCTIONS_T)
        .with_shard("classes_13", CLASSES_T)
        .with_shard("functions_12", FUNCTIONS_S_MALFORMED)
}

/// Options searching only `functions`.
pub fn functions_only() -> EngineOptions {
    EngineOptions {
        scope: SearchScope::Categories(vec!["functions".to_string()]),
        ..EngineOptions::default()
    }
}

/// An engine over `source`.
pub fn engine_over(source: Arc<dyn ShardSource>, options: EngineOptions) -> QueryEngine {
    QueryEngine::new(Arc::new(ShardStore::new(source)), options)
}

/// Display labels of an outcome's rows.
pub fn labels(outcome: &doxsearch::QueryOutcome) -> Vec<String> {
    outcome
        .rows()
        .iter()
        .map(|row| row.display_label.clone())
        .collect()
}
