//! HTML entity decoding for labels and tooltips.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);")
        .expect("Failed to compile HTML entity regex")
});

/// Decode the HTML entities the generator writes into names and tooltips.
///
/// Numeric references and the common named entities are decoded; unknown
/// named entities are left untouched.
///
/// ```
/// use doxsearch::format::decode_entities;
///
/// assert_eq!(decode_entities("const std::string &amp;s"), "const std::string &s");
/// assert_eq!(decode_entities("to_string():&#160;x.h"), "to_string():\u{a0}x.h");
/// ```
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    ENTITY_REGEX
        .replace_all(text, |caps: &Captures| {
            decode_entity(&caps[1])
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(body: &str) -> Option<char> {
    if let Some(hex) = body
        .strip_prefix("#x")
        .or_else(|| body.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = body.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32);
    }

    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        "hellip" => Some('\u{2026}'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_entities() {
        assert_eq!(
            decode_entities("std::function&lt; void()&gt; &amp;func"),
            "std::function< void()> &func"
        );
        assert_eq!(decode_entities("&quot;&quot;"), "\"\"");
    }

    #[test]
    fn test_numeric_entities() {
        assert_eq!(decode_entities("&#160;"), "\u{a0}");
        assert_eq!(decode_entities("&#x41;&#X42;"), "AB");
    }

    #[test]
    fn test_unknown_entity_untouched() {
        assert_eq!(decode_entities("&bogus; &amp;"), "&bogus; &");
    }

    #[test]
    fn test_invalid_code_point_untouched() {
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(decode_entities("TerminateJob"), "TerminateJob");
        assert_eq!(decode_entities("a & b"), "a & b");
    }
}
