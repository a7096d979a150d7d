//! SearchKey value object and key normalization.

use super::errors::ValidationError;
use std::fmt;
use std::fmt::Write as _;

/// Normalize text the way index keys are normalized.
///
/// The text is trimmed and lower-cased. ASCII letters and digits, and every
/// non-ASCII character, are kept as-is; any other ASCII character is written
/// as `_` followed by its two-digit lower-case hex code.
///
/// ```
/// use doxsearch::domain::normalize;
///
/// assert_eq!(normalize("to_string"), "to_5fstring");
/// assert_eq!(normalize("  TIFF "), "tiff");
/// assert_eq!(normalize("~Timer"), "_7etimer");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || !c.is_ascii() {
            out.push(c);
        } else {
            // Writing to a String cannot fail.
            let _ = write!(out, "_{:02x}", c as u32);
        }
    }
    out
}

/// A normalized, non-empty search key derived from user input.
///
/// Keeps both the normalized form (compared against index keys) and the
/// lower-cased text (compared against manifest buckets, which are raw
/// characters).
///
/// # Example
///
/// ```
/// use doxsearch::domain::SearchKey;
///
/// let key = SearchKey::from_query("To_Str").unwrap();
/// assert_eq!(key.as_str(), "to_5fstr");
/// assert_eq!(key.lowered(), "to_str");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey {
    normalized: String,
    lowered: String,
}

impl SearchKey {
    /// Build a key from raw query text.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyQuery` if the text is empty after trimming.
    pub fn from_query(raw: &str) -> Result<Self, ValidationError> {
        let lowered = raw.trim().to_lowercase();
        if lowered.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }

        Ok(Self {
            normalized: normalize(&lowered),
            lowered,
        })
    }

    /// The normalized key.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// The trimmed, lower-cased query text.
    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    /// Whether a bucket could hold keys matching this query.
    ///
    /// True when the query starts with the bucket, or when the query is
    /// shorter than the bucket and the bucket starts with it.
    pub fn fits_bucket(&self, bucket: &str) -> bool {
        !bucket.is_empty()
            && (self.lowered.starts_with(bucket) || bucket.starts_with(self.lowered.as_str()))
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized)
    }
}
