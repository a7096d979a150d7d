//! Codecs for the files a generated search index is made of.
//!
//! - [`literal`]: `nom` parser for the JavaScript literals the generator emits
//! - [`shard`]: shard tables to [`Shard`](crate::models::Shard)
//! - [`manifest`]: `searchdata.js` to [`IndexManifest`](crate::models::IndexManifest)
//! - [`entities`]: HTML entity decoding for display text

pub mod entities;
pub mod literal;
pub mod manifest;
pub mod shard;

pub use entities::decode_entities;
pub use literal::{parse_literal, parse_script};
pub use manifest::parse_manifest;
pub use shard::{decode_shard, parse_shard};
