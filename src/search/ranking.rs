//! Candidate ranking, deduplication and truncation.

use super::outcome::{ResultRow, ResultSet};
use crate::matching::MatchType;
use crate::models::{IndexEntry, SymbolRecord};
use std::collections::HashSet;

/// One `(entry, record)` pair collected from a shard.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Position of the category in the search scope
    pub category_rank: usize,

    /// Category name
    pub category: &'a str,

    /// How the entry's key matched
    pub match_type: MatchType,

    /// The matched entry
    pub entry: &'a IndexEntry,

    /// Position of the record within the entry
    pub record_position: usize,

    /// The record itself
    pub record: &'a SymbolRecord,
}

impl<'a> Candidate<'a> {
    /// Flatten an entry into one candidate per record, in record order.
    pub fn from_entry(
        category_rank: usize,
        category: &'a str,
        match_type: MatchType,
        entry: &'a IndexEntry,
    ) -> impl Iterator<Item = Candidate<'a>> + 'a {
        entry
            .records
            .iter()
            .enumerate()
            .map(move |(record_position, record)| Candidate {
                category_rank,
                category,
                match_type,
                entry,
                record_position,
                record,
            })
    }

    fn is_exact(&self) -> bool {
        self.match_type == MatchType::ExactKey
    }

    /// Rows pointing at the same declaration collapse to one.
    fn identity(&self) -> (&'a str, Option<&'a str>, &'a str, &'a str) {
        (
            self.record.display_name.as_str(),
            self.record.qualified_scope.as_deref(),
            self.record.target_url.as_str(),
            self.record.anchor.as_str(),
        )
    }
}

/// Display order key: exact key matches, then label (case-insensitive,
/// then case-sensitive), then key, category, ordinal and record position.
type SortKey<'a> = (bool, String, &'a str, &'a str, usize, u32, usize);

fn sort_key<'a>(candidate: &Candidate<'a>) -> SortKey<'a> {
    let entry = candidate.entry;
    (
        !candidate.is_exact(),
        entry.display_label.to_lowercase(),
        entry.display_label.as_str(),
        entry.key.as_str(),
        candidate.category_rank,
        entry.ordinal,
        candidate.record_position,
    )
}

/// Sort, deduplicate and truncate candidates into a result set.
///
/// Each candidate's label is lowered once. The sort is stable, so
/// candidates with equal keys keep their collection order.
pub fn rank(mut candidates: Vec<Candidate<'_>>, max_results: usize) -> ResultSet {
    candidates.sort_by_cached_key(sort_key);

    let mut seen = HashSet::with_capacity(candidates.len());
    let mut rows = Vec::with_capacity(candidates.len().min(max_results));
    let mut truncated = false;

    for candidate in candidates {
        if !seen.insert(candidate.identity()) {
            continue;
        }
        if rows.len() == max_results {
            truncated = true;
            break;
        }
        rows.push(ResultRow::from_record(candidate.record, candidate.category));
    }

    ResultSet { rows, truncated }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(label: &str, scope: &str, anchor: &str) -> SymbolRecord {
        SymbolRecord::from_link(
            label,
            &format!("page.html#{}", anchor),
            true,
            &format!("{}::{}()", scope, label),
        )
    }

    fn entry(key: &str, ordinal: u32, label: &str, records: Vec<SymbolRecord>) -> IndexEntry {
        IndexEntry::new(key, ordinal, label, records)
    }

    fn candidates<'a>(entries: &'a [IndexEntry], category: &'a str, key: &str) -> Vec<Candidate<'a>> {
        entries
            .iter()
            .flat_map(|e| {
                let match_type = if e.key == key {
                    MatchType::ExactKey
                } else {
                    MatchType::Prefix
                };
                Candidate::from_entry(0, category, match_type, e)
            })
            .collect()
    }

    fn labels(set: &ResultSet) -> Vec<String> {
        set.rows.iter().map(|r| r.display_label.clone()).collect()
    }

    #[test]
    fn test_case_insensitive_label_order() {
        let entries = vec![
            entry("timer", 4, "Timer", vec![record("Timer", "Ns::Timer", "a1")]),
            entry("time", 2, "time", vec![record("time", "Ns", "a2")]),
        ];
        let set = rank(candidates(&entries, "all", "tim"), 200);
        assert_eq!(labels(&set), vec!["time", "Timer"]);
        assert!(!set.truncated);
    }

    #[test]
    fn test_case_sensitive_tiebreak_after_lowered_label() {
        let entries = vec![
            entry("timer", 3, "timer", vec![record("timer", "Ns", "a3")]),
            entry("tiff", 1, "tiff", vec![record("tiff", "Ns", "a1")]),
            entry("timer", 2, "Timer", vec![record("Timer", "Ns", "a2")]),
        ];
        let set = rank(candidates(&entries, "all", "ti"), 200);
        assert_eq!(labels(&set), vec!["tiff", "Timer", "timer"]);
    }

    #[test]
    fn test_exact_match_first() {
        let entries = vec![
            entry("ab", 0, "ab", vec![record("ab", "Ns", "a1")]),
            entry("abc", 1, "abc", vec![record("abc", "Ns", "a2")]),
        ];
        let set = rank(candidates(&entries, "all", "abc"), 200);
        assert_eq!(labels(&set), vec!["abc", "ab"]);
    }

    #[test]
    fn test_records_keep_declaration_order() {
        let entries = vec![entry(
            "tiff",
            1,
            "TIFF",
            vec![record("TIFF", "Ns::TIFF", "b2"), record("TIFF", "Ns::TIFF", "a1")],
        )];
        let set = rank(candidates(&entries, "all", "tiff"), 200);
        let anchors: Vec<&str> = set.rows.iter().map(|r| r.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["b2", "a1"]);
    }

    #[test]
    fn test_duplicates_collapse_scopes_stay() {
        let entries = vec![
            entry("timer", 0, "Timer", vec![record("Timer", "A", "x")]),
            entry("timer", 1, "Timer", vec![record("Timer", "A", "x"), record("Timer", "B", "x")]),
        ];
        let set = rank(candidates(&entries, "all", "tim"), 200);
        let scopes: Vec<Option<&str>> = set
            .rows
            .iter()
            .map(|r| r.qualified_scope.as_deref())
            .collect();
        assert_eq!(scopes, vec![Some("A"), Some("B")]);
    }

    #[test]
    fn test_category_rank_breaks_ties() {
        let entries = vec![entry("tiff", 1, "TIFF", vec![record("TIFF", "Ns", "a")])];
        let mut all: Vec<Candidate<'_>> = Candidate::from_entry(1, "classes", MatchType::Prefix, &entries[0]).collect();
        all.extend(Candidate::from_entry(0, "functions", MatchType::Prefix, &entries[0]));

        let set = rank(all, 200);
        assert_eq!(set.len(), 1);
        assert_eq!(set.rows[0].category, "functions");
    }

    #[test]
    fn test_truncation() {
        let entries: Vec<IndexEntry> = (0..5)
            .map(|i| {
                let label = format!("t{}", i);
                entry(&label, 0, &label, vec![record(&label, "Ns", &label)])
            })
            .collect();

        let set = rank(candidates(&entries, "all", "t"), 3);
        assert_eq!(labels(&set), vec!["t0", "t1", "t2"]);
        assert!(set.truncated);

        let set = rank(candidates(&entries, "all", "t"), 5);
        assert_eq!(set.len(), 5);
        assert!(!set.truncated);
    }
}
