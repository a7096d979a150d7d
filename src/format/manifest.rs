//! Decoder for the index manifest (`searchdata.js`).
//!
//! ```text
//! var indexSectionsWithContent = { 0: "_abcdefghilmnoprstuvw~", 4: "abcdt" };
//! var indexSectionNames = { 0: "all", 4: "functions" };
//! var indexSectionLabels = { 0: "All", 4: "Functions" };
//! ```

use super::entities::decode_entities;
use super::literal::parse_script;
use crate::error::{FormatError, FormatResult};
use crate::models::{CategoryInfo, IndexManifest};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Category id to bucket characters.
pub const SECTIONS_VARIABLE: &str = "indexSectionsWithContent";

/// Category id to category name.
pub const NAMES_VARIABLE: &str = "indexSectionNames";

/// Category id to display label (optional).
pub const LABELS_VARIABLE: &str = "indexSectionLabels";

/// Parse manifest text: a generated script or a JSON-serialized manifest.
pub fn parse_manifest(text: &str) -> FormatResult<IndexManifest> {
    if text.trim_start().starts_with('{') {
        let manifest: IndexManifest = serde_json::from_str(text)?;
        return Ok(IndexManifest::new(manifest.categories().to_vec()));
    }

    let vars: HashMap<String, Value> = parse_script(text)?.into_iter().collect();
    let sections = object_variable(&vars, SECTIONS_VARIABLE)?;
    let names = object_variable(&vars, NAMES_VARIABLE)?;
    let labels = vars.get(LABELS_VARIABLE).and_then(Value::as_object);

    let mut categories = Vec::with_capacity(sections.len());
    for (id_text, content) in sections {
        let path = format!("{}[{}]", SECTIONS_VARIABLE, id_text);
        let id = id_text.parse::<usize>().map_err(|_| FormatError::Structure {
            path: path.clone(),
            reason: "category id is not a number".to_string(),
        })?;
        let buckets = content.as_str().ok_or_else(|| FormatError::Structure {
            path: path.clone(),
            reason: "expected a string of bucket characters".to_string(),
        })?;
        let name = names
            .get(id_text)
            .and_then(Value::as_str)
            .ok_or_else(|| FormatError::Structure {
                path: format!("{}[{}]", NAMES_VARIABLE, id_text),
                reason: "category has no name".to_string(),
            })?;
        let label = labels
            .and_then(|labels| labels.get(id_text))
            .and_then(Value::as_str)
            .map(decode_entities)
            .unwrap_or_else(|| name.to_string());

        categories.push(CategoryInfo::with_bucket_chars(id, name, label, buckets));
    }

    Ok(IndexManifest::new(categories))
}

fn object_variable<'a>(
    vars: &'a HashMap<String, Value>,
    name: &str,
) -> FormatResult<&'a Map<String, Value>> {
    vars.get(name)
        .ok_or_else(|| FormatError::MissingVariable(name.to_string()))?
        .as_object()
        .ok_or_else(|| FormatError::Structure {
            path: name.to_string(),
            reason: "expected an object".to_string(),
        })
}
