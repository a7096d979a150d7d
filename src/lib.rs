//! doxsearch - shard store and incremental prefix-search engine for
//! Doxygen client-side search indexes.
//!
//! A generated documentation set ships its search index as a manifest
//! (`searchdata.js`) plus many small shard files, one per category and
//! initial bucket. This library loads those shards lazily as a query
//! narrows, keeps them cached, and turns each keystroke into a ranked,
//! display-ready result list.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects (search keys, shard keys)
//! - **models**: Index data model (records, entries, shards, manifest)
//! - **format**: Codecs for generated shard and manifest scripts
//! - **source**: Where shard text comes from (directory, HTTP, memory)
//! - **cache**: Append-only cache primitive
//! - **store**: Lazily populated shard store
//! - **matching**: Candidate shard selection and key matching
//! - **search**: Query engine, ranking and keystroke session
//! - **observability**: Logging setup and metrics
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling
//!
//! # Example
//!
//! ```
//! use doxsearch::{EngineOptions, MemoryShardSource, QueryEngine, ShardStore};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let source = MemoryShardSource::new()
//!     .with_manifest("var indexSectionsWithContent={0:'t'}; var indexSectionNames={0:'all'};")
//!     .with_shard("all_0", "var searchData=[['time_0',['time',['t.html#a1',1,'Ns::time()']]]];");
//!
//! let store = Arc::new(ShardStore::new(Arc::new(source)));
//! let engine = QueryEngine::new(store, EngineOptions::default());
//!
//! let outcome = engine.evaluate("ti").await;
//! assert_eq!(outcome.rows()[0].display_label, "time");
//! # });
//! ```

pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod matching;
pub mod models;
pub mod observability;
pub mod search;
pub mod source;
pub mod store;

pub use config::Config;
pub use domain::{normalize, SearchKey, ShardKey};
pub use error::{ConfigError, FormatError, QueryError, StoreError};
pub use matching::MatchMode;
pub use models::{CategoryInfo, IndexEntry, IndexManifest, Shard, SymbolRecord};
pub use observability::{init_logging, MetricsTracker};
pub use search::{
    EngineOptions, QueryEngine, QueryOutcome, QuerySession, ResultRow, ResultSet, SearchScope,
    SessionSnapshot, SessionState,
};
pub use source::{DirectoryShardSource, HttpShardSource, MemoryShardSource, ShardSource};
pub use store::{ShardCache, ShardStore};
