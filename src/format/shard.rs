//! Decoder for shard files.
//!
//! The generator writes each shard as
//!
//! ```text
//! var searchData=
//! [
//!   ['tiff_1',['TIFF',['../class_t_i_f_f.html#a14b8',1,'Image::TIFF::TIFF(...)'],[...]]],
//!   ...
//! ];
//! ```
//!
//! Each row is `[unique_key, [label, record, record, ...]]` and each record is
//! `[link, local_flag, tooltip]`. The nested layout `[unique_key, [label,
//! [record, ...]]]` and records of the form `[url, anchor, tooltip]` are
//! accepted as well, and so is a structured JSON document serialized from
//! [`Shard`].

use super::entities::decode_entities;
use super::literal::{parse_literal, parse_script};
use crate::error::{FormatError, FormatResult};
use crate::models::{IndexEntry, Shard, SymbolRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Variable holding the entry table in a shard script.
pub const SHARD_VARIABLE: &str = "searchData";

static ORDINAL_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+)_([0-9]+)$").expect("Failed to compile ordinal suffix regex")
});

/// Parse shard text in any of the accepted layouts.
pub fn parse_shard(text: &str) -> FormatResult<Shard> {
    let head = text.trim_start();

    if head.starts_with('{') {
        return Ok(serde_json::from_str::<Shard>(text)?);
    }

    let table = if head.starts_with('[') {
        parse_literal(text)?
    } else {
        parse_script(text)?
            .into_iter()
            .find(|(name, _)| name == SHARD_VARIABLE)
            .map(|(_, value)| value)
            .ok_or_else(|| FormatError::MissingVariable(SHARD_VARIABLE.to_string()))?
    };

    decode_shard(&table)
}

/// Decode a parsed entry table into a validated shard.
pub fn decode_shard(table: &Value) -> FormatResult<Shard> {
    let rows = table
        .as_array()
        .ok_or_else(|| structure(SHARD_VARIABLE, "expected an array of entries"))?;

    let entries = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| decode_entry(idx, row))
        .collect::<FormatResult<Vec<_>>>()?;

    Shard::new(entries)
}

fn decode_entry(idx: usize, row: &Value) -> FormatResult<IndexEntry> {
    let path = format!("entry {}", idx);
    let pair = as_array(row, &path)?;
    if pair.len() != 2 {
        return Err(structure(
            &path,
            &format!("expected [key, group], found {} elements", pair.len()),
        ));
    }

    let raw_key = as_str(&pair[0], &format!("{}.key", path))?;
    let (key, ordinal) = split_ordinal(raw_key, idx);

    let group_path = format!("{} ({})", path, raw_key);
    let group = as_array(&pair[1], &group_path)?;
    let (label, rest) = group
        .split_first()
        .ok_or_else(|| structure(&group_path, "empty group"))?;
    let label = as_str(label, &format!("{}.label", group_path))?;

    let record_values: Vec<&Value> = match rest {
        [Value::Array(inner)] if inner.first().is_some_and(Value::is_array) => {
            inner.iter().collect()
        }
        _ => rest.iter().collect(),
    };

    let records = record_values
        .into_iter()
        .enumerate()
        .map(|(n, value)| decode_record(label, value, &format!("{}.record {}", group_path, n)))
        .collect::<FormatResult<Vec<_>>>()?;

    Ok(IndexEntry::new(
        key,
        ordinal,
        decode_entities(label),
        records,
    ))
}

fn decode_record(label: &str, value: &Value, path: &str) -> FormatResult<SymbolRecord> {
    let fields = as_array(value, path)?;
    let (link, second, tooltip) = match fields.as_slice() {
        [link, second] => (link, second, None),
        [link, second, tooltip] => (link, second, Some(tooltip)),
        _ => {
            return Err(structure(
                path,
                &format!("expected 2 or 3 fields, found {}", fields.len()),
            ))
        }
    };

    let link = as_str(link, &format!("{}.link", path))?;
    let tooltip = match tooltip {
        Some(value) => as_str(value, &format!("{}.tooltip", path))?,
        None => "",
    };

    let record = match second {
        Value::Number(n) => {
            SymbolRecord::from_link(label, link, n.as_f64() != Some(0.0), tooltip)
        }
        Value::Bool(local) => SymbolRecord::from_link(label, link, *local, tooltip),
        Value::String(anchor) if anchor.is_empty() => {
            SymbolRecord::from_link(label, link, true, tooltip)
        }
        Value::String(anchor) => {
            SymbolRecord::from_link(label, &format!("{}#{}", link, anchor), true, tooltip)
        }
        _ => {
            return Err(structure(
                &format!("{}.flag", path),
                "expected a number, boolean or anchor string",
            ))
        }
    };

    Ok(record)
}

/// Split the generator's `_N` uniqueness suffix off a raw key.
///
/// Keys without a suffix take their row position as ordinal.
fn split_ordinal(raw_key: &str, row: usize) -> (String, u32) {
    if let Some(caps) = ORDINAL_SUFFIX_REGEX.captures(raw_key) {
        if let Ok(ordinal) = caps[2].parse::<u32>() {
            return (caps[1].to_lowercase(), ordinal);
        }
    }
    (raw_key.to_lowercase(), row as u32)
}

fn as_array<'a>(value: &'a Value, path: &str) -> FormatResult<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| structure(path, &format!("expected an array, found {}", kind(value))))
}

fn as_str<'a>(value: &'a Value, path: &str) -> FormatResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| structure(path, &format!("expected a string, found {}", kind(value))))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn structure(path: &str, reason: &str) -> FormatError {
    FormatError::Structure {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
