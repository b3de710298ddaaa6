//! Pulling colors out of pasted text and drag-and-drop payloads.

use std::sync::LazyLock;

use regex::Regex;

use crate::color::codec::{HexColor, Rgb, UnitRgb, normalize};

static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#?[0-9A-Fa-f]{3}(?:[0-9A-Fa-f]{3})?").expect("valid regex"));

/// Every hex color mentioned in `text`, normalized, in order of appearance.
///
/// Duplicates are kept; callers that insert into a palette skip them there.
pub fn extract_hex_colors(text: &str) -> Vec<HexColor> {
    HEX_RE
        .find_iter(text)
        .filter_map(|m| normalize(m.as_str()).ok())
        .collect()
}

/// Something dropped onto a palette.
#[derive(Debug, Clone, PartialEq)]
pub enum DropPayload {
    /// A native color object, in sRGB unit components
    Color(UnitRgb),
    /// Plain text, scanned for hex colors
    Text(String),
}

impl DropPayload {
    /// Colors carried by this payload.
    pub fn colors(&self) -> Vec<HexColor> {
        match self {
            DropPayload::Color(unit) => vec![Rgb::from_unit(*unit).to_hex()],
            DropPayload::Text(text) => extract_hex_colors(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(list: &[HexColor]) -> Vec<&str> {
        list.iter().map(|h| h.as_str()).collect()
    }

    #[test]
    fn test_extracts_in_order() {
        let text = "red #ff0000 plus abc or #1F2D3A!";
        assert_eq!(
            strs(&extract_hex_colors(text)),
            vec!["#FF0000", "#AABBCC", "#1F2D3A"]
        );
    }

    #[test]
    fn test_prefers_six_digit_match() {
        assert_eq!(strs(&extract_hex_colors("#abcdef")), vec!["#ABCDEF"]);
    }

    #[test]
    fn test_no_matches() {
        assert!(extract_hex_colors("nothing to see here").is_empty());
        assert!(extract_hex_colors("").is_empty());
    }

    #[test]
    fn test_keeps_duplicates() {
        assert_eq!(extract_hex_colors("#fff #FFFFFF").len(), 2);
    }

    #[test]
    fn test_drop_payloads() {
        let native = DropPayload::Color(UnitRgb::new(1.0, 0.5, 0.0));
        assert_eq!(strs(&native.colors()), vec!["#FF8000"]);

        let text = DropPayload::Text("#123 and #456".to_string());
        assert_eq!(strs(&text.colors()), vec!["#112233", "#445566"]);
    }
}
