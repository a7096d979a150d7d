//! Parsing of generated search directory files.

mod fixtures;

use doxsearch::format::{parse_manifest, parse_shard};
use doxsearch::FormatError;
use fixtures::*;

#[test]
fn test_parse_generated_functions_shard() {
    let shard = parse_shard(FUNCTIONS_T).unwrap();

    assert_eq!(shard.len(), 14);
    assert_eq!(shard.record_count(), 28);

    let keys: Vec<&str> = shard.entries().iter().map(|e| e.key.as_str()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted, "entries are held in key order");
}

#[test]
fn test_tiff_entry() {
    let shard = parse_shard(FUNCTIONS_T).unwrap();
    let tiff = shard.lookup_exact("tiff").unwrap();

    assert_eq!(tiff.ordinal, 1);
    assert_eq!(tiff.display_label, "TIFF");
    assert_eq!(tiff.records.len(), 2);

    let first = &tiff.records[0];
    assert_eq!(
        first.target_url,
        "../class_biometric_evaluation_1_1_image_1_1_t_i_f_f.html"
    );
    assert_eq!(first.anchor, "a14b885972e5f650c741f03551b9a6c67");
    assert_eq!(
        first.qualified_scope.as_deref(),
        Some("BiometricEvaluation::Image::TIFF")
    );
    assert!(first.local);
    assert!(first.tooltip.contains("&amp;identifier=&quot;&quot;"));
    assert!(first
        .display_tooltip()
        .contains("const std::string &identifier=\"\""));

    assert_ne!(tiff.records[0].anchor, tiff.records[1].anchor);
}

#[test]
fn test_escaped_key_and_file_scope() {
    let shard = parse_shard(FUNCTIONS_T).unwrap();
    let entry = shard.lookup_exact("to_5fstring").unwrap();

    assert_eq!(entry.display_label, "to_string");
    assert_eq!(entry.records.len(), 7);
    assert_eq!(
        entry.records[0].qualified_scope.as_deref(),
        Some("BiometricEvaluation::Framework")
    );
    assert_eq!(entry.records[6].qualified_scope, None);
    assert_eq!(
        entry.records[6].target_url,
        "../be__memory__autoarrayutility_8h.html"
    );
}

#[test]
fn test_scope_only_tooltip() {
    let shard = parse_shard(FUNCTIONS_T).unwrap();
    let time = shard.lookup_exact("time").unwrap();

    assert_eq!(
        time.records[0].qualified_scope.as_deref(),
        Some("BiometricEvaluation::Time::Timer")
    );
}

#[test]
fn test_prefix_range_over_generated_shard() {
    let shard = parse_shard(FUNCTIONS_T).unwrap();

    let keys: Vec<&str> = shard
        .prefix_range("tim")
        .iter()
        .map(|e| e.key.as_str())
        .collect();
    assert_eq!(keys, vec!["time", "timedwait", "timer"]);

    assert!(shard.prefix_range("tz").is_empty());
    assert_eq!(shard.prefix_range("t").len(), shard.len());
}

#[test]
fn test_duplicate_unique_key_is_malformed() {
    assert_eq!(
        parse_shard(FUNCTIONS_S_MALFORMED).unwrap_err(),
        FormatError::DuplicateKey("seek_0".to_string())
    );
}

#[test]
fn test_truncated_shard_is_malformed() {
    let cut = &FUNCTIONS_T[..FUNCTIONS_T.len() / 2];
    assert!(matches!(
        parse_shard(cut).unwrap_err(),
        FormatError::Syntax(_)
    ));
}

#[test]
fn test_parse_fixture_manifest() {
    let manifest = parse_manifest(MANIFEST).unwrap();

    let names: Vec<&str> = manifest
        .categories()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["classes", "functions"]);
    assert!(!manifest.has_all_category());

    let functions = manifest.category("functions").unwrap();
    assert_eq!(functions.buckets[13], "t");
    assert_eq!(functions.label, "Functions");
}

#[test]
fn test_structured_shard_document() {
    let shard = parse_shard(FUNCTIONS_T).unwrap();
    let json = serde_json::to_string(&shard).unwrap();
    assert_eq!(parse_shard(&json).unwrap(), shard);
}
