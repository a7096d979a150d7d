//! Display-ready query results.

use crate::models::SymbolRecord;
use serde::Serialize;

/// One row of a result list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResultRow {
    /// Symbol name (HTML entities decoded)
    pub display_label: String,

    /// Containing namespace/class chain, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_scope: Option<String>,

    /// Descriptive label (HTML entities decoded)
    pub tooltip: String,

    /// Relative link to the page holding the declaration
    pub target_url: String,

    /// In-page fragment; may be empty
    pub anchor: String,

    /// Category the row was found in
    pub category: String,

    /// Whether the link stays inside this documentation set
    pub local: bool,
}

impl ResultRow {
    /// Build a row for a record found in `category`.
    pub fn from_record(record: &SymbolRecord, category: &str) -> Self {
        Self {
            display_label: record.display_name.clone(),
            qualified_scope: record.qualified_scope.clone(),
            tooltip: record.display_tooltip(),
            target_url: record.target_url.clone(),
            anchor: record.anchor.clone(),
            category: category.to_string(),
            local: record.local,
        }
    }

    /// The full link, `target_url#anchor`.
    pub fn link(&self) -> String {
        if self.anchor.is_empty() {
            self.target_url.clone()
        } else {
            format!("{}#{}", self.target_url, self.anchor)
        }
    }
}

/// Ranked rows, possibly cut short.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    /// Rows in display order
    pub rows: Vec<ResultRow>,

    /// Whether more rows matched than were kept
    pub truncated: bool,
}

impl ResultSet {
    /// Number of rows kept.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no rows were kept.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// What a search box shows for one query text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "results", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// No query text; show nothing
    Idle,

    /// Matching rows
    Results(ResultSet),

    /// The query matched nothing
    NoResults,

    /// The index could not be loaded
    NoIndexAvailable,
}

impl QueryOutcome {
    /// Rows to display; empty unless there are results.
    pub fn rows(&self) -> &[ResultRow] {
        match self {
            Self::Results(set) => &set.rows,
            _ => &[],
        }
    }

    /// Whether the displayed rows were cut short.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Results(set) if set.truncated)
    }

    /// Check for the idle outcome.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl From<ResultSet> for QueryOutcome {
    fn from(set: ResultSet) -> Self {
        if set.is_empty() {
            Self::NoResults
        } else {
            Self::Results(set)
        }
    }
}
