//! SymbolRecord model: one documented declaration site.

use crate::format::decode_entities;
use serde::{Deserialize, Serialize};

/// Separator the generator puts between a file-level symbol and its header
/// (`to_string():&#160;be_memory_autoarrayutility.h` once decoded).
const FILE_SCOPE_SEPARATOR: &str = ":\u{a0}";

fn default_local() -> bool {
    true
}

/// One concrete declaration or overload site for a symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymbolRecord {
    /// Name as shown in results (HTML entities decoded)
    pub display_name: String,

    /// Containing namespace/class chain; absent for file-level symbols
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_scope: Option<String>,

    /// Relative link to the page holding the declaration
    pub target_url: String,

    /// In-page fragment; empty when the link targets a whole page
    #[serde(default)]
    pub anchor: String,

    /// Descriptive label, verbatim as generated
    #[serde(default)]
    pub tooltip: String,

    /// Whether the link stays inside this documentation set
    #[serde(default = "default_local")]
    pub local: bool,
}

impl SymbolRecord {
    /// Build a record from the generator's link tuple.
    ///
    /// `link` is `page.html#anchor` (the anchor is optional). The qualified
    /// scope is derived from the decoded tooltip.
    pub fn from_link(display_label: &str, link: &str, local: bool, tooltip: &str) -> Self {
        let (target_url, anchor) = match link.split_once('#') {
            Some((url, anchor)) => (url.to_string(), anchor.to_string()),
            None => (link.to_string(), String::new()),
        };
        let display_name = decode_entities(display_label);
        let qualified_scope = derive_scope(&decode_entities(tooltip), &display_name);

        Self {
            display_name,
            qualified_scope,
            target_url,
            anchor,
            tooltip: tooltip.to_string(),
            local,
        }
    }

    /// The full link, `target_url#anchor`, or the bare URL without an anchor.
    pub fn link(&self) -> String {
        if self.anchor.is_empty() {
            self.target_url.clone()
        } else {
            format!("{}#{}", self.target_url, self.anchor)
        }
    }

    /// Tooltip with HTML entities decoded, for display.
    pub fn display_tooltip(&self) -> String {
        decode_entities(&self.tooltip)
    }
}

/// Derive the qualified scope from a decoded tooltip.
///
/// `BiometricEvaluation::Time::Timer::Timer()` under label `Timer` yields
/// `BiometricEvaluation::Time::Timer`; a tooltip that is already a scope
/// (`BiometricEvaluation::Text`) is returned whole; the file form
/// `name():<nbsp>file.h` has no scope.
pub fn derive_scope(tooltip: &str, display_label: &str) -> Option<String> {
    let tooltip = tooltip.trim();
    if tooltip.is_empty() || tooltip.contains(FILE_SCOPE_SEPARATOR) {
        return None;
    }

    let declarator = strip_parameter_list(tooltip);
    let scope = declarator
        .strip_suffix(display_label)
        .and_then(|rest| rest.strip_suffix("::"))
        .unwrap_or(declarator);

    if scope.is_empty() || scope == display_label {
        None
    } else {
        Some(scope.to_string())
    }
}

/// Drop a trailing, balanced `(...)` parameter list.
fn strip_parameter_list(declaration: &str) -> &str {
    if !declaration.ends_with(')') {
        return declaration;
    }

    let mut depth = 0usize;
    for (idx, c) in declaration.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    return &declaration[..idx];
                }
            }
            _ => {}
        }
    }
    declaration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_link_splits_anchor() {
        let record = SymbolRecord::from_link(
            "Timer",
            "../class_biometric_evaluation_1_1_time_1_1_timer.html#a289f39f22fc1913ec9a37d5b5d6e3d1a",
            true,
            "BiometricEvaluation::Time::Timer::Timer()",
        );
        assert_eq!(
            record.target_url,
            "../class_biometric_evaluation_1_1_time_1_1_timer.html"
        );
        assert_eq!(record.anchor, "a289f39f22fc1913ec9a37d5b5d6e3d1a");
        assert_eq!(
            record.qualified_scope.as_deref(),
            Some("BiometricEvaluation::Time::Timer")
        );
        assert!(record.local);
    }

    #[test]
    fn test_from_link_without_anchor() {
        let record = SymbolRecord::from_link("Text", "../namespace_text.html", true, "");
        assert_eq!(record.target_url, "../namespace_text.html");
        assert_eq!(record.anchor, "");
        assert_eq!(record.link(), "../namespace_text.html");
        assert_eq!(record.qualified_scope, None);
    }

    #[test]
    fn test_link_round_trip() {
        let record = SymbolRecord::from_link("f", "page.html#abc", false, "Ns::f()");
        assert_eq!(record.link(), "page.html#abc");
        assert!(!record.local);
    }

    #[test]
    fn test_tooltip_kept_verbatim() {
        let record = SymbolRecord::from_link(
            "trim",
            "page.html#a1",
            true,
            "BiometricEvaluation::Text::trim(const std::string &amp;s, const char trimChar)",
        );
        assert!(record.tooltip.contains("&amp;"));
        assert!(record.display_tooltip().contains("const std::string &s"));
        assert_eq!(
            record.qualified_scope.as_deref(),
            Some("BiometricEvaluation::Text")
        );
    }

    #[test]
    fn test_scope_when_tooltip_is_scope() {
        assert_eq!(
            derive_scope("BiometricEvaluation::Time::Timer", "time").as_deref(),
            Some("BiometricEvaluation::Time::Timer")
        );
    }

    #[test]
    fn test_scope_for_file_level_symbol() {
        assert_eq!(
            derive_scope("to_string():\u{a0}be_memory_autoarrayutility.h", "to_string"),
            None
        );
    }

    #[test]
    fn test_scope_with_nested_parentheses() {
        assert_eq!(
            derive_scope(
                "BiometricEvaluation::Time::Timer::Timer(const std::function< void()> &func)",
                "Timer"
            )
            .as_deref(),
            Some("BiometricEvaluation::Time::Timer")
        );
    }

    #[test]
    fn test_scope_for_call_operator() {
        assert_eq!(
            derive_scope("Ns::Functor::operator()(int x)", "operator()").as_deref(),
            Some("Ns::Functor")
        );
    }

    #[test]
    fn test_scope_for_unqualified_function() {
        assert_eq!(derive_scope("main()", "main"), None);
        assert_eq!(derive_scope("", "main"), None);
    }
}
