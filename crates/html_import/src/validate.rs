//! Advisory structural validation
//!
//! The verdict is informational: callers log it and carry on rendering.

use crate::tree::is_void_element;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Error reported for empty or whitespace-only content
pub const EMPTY_CONTENT_ERROR: &str = "Content is empty";

/// Largest tolerated open/close difference for a single tag name
pub const UNBALANCED_TAG_THRESHOLD: i64 = 2;

fn tag_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)\b[^>]*?(/?)>").ok())
        .as_ref()
}

/// Result of validating a piece of content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Validate content structure.
///
/// Counts opening and closing tags per name, ignoring void and
/// self-closing tags, and reports every name whose counts differ by more
/// than [`UNBALANCED_TAG_THRESHOLD`].
pub fn validate(html: &str) -> ValidationReport {
    if html.trim().is_empty() {
        return ValidationReport {
            is_valid: false,
            errors: vec![EMPTY_CONTENT_ERROR.to_string()],
        };
    }

    let mut balance: BTreeMap<String, i64> = BTreeMap::new();
    if let Some(re) = tag_re() {
        for caps in re.captures_iter(html) {
            let name = caps[2].to_ascii_lowercase();
            if is_void_element(&name) || !caps[3].is_empty() {
                continue;
            }
            let delta = if caps[1].is_empty() { 1 } else { -1 };
            *balance.entry(name).or_insert(0) += delta;
        }
    }

    let errors: Vec<String> = balance
        .iter()
        .filter(|(_, count)| count.abs() > UNBALANCED_TAG_THRESHOLD)
        .map(|(tag, _)| format!("Unbalanced tags detected: {}", tag))
        .collect();

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content() {
        for input in ["", "   ", "\n\t"] {
            let report = validate(input);
            assert!(!report.is_valid);
            assert_eq!(report.errors, vec![EMPTY_CONTENT_ERROR.to_string()]);
        }
    }

    #[test]
    fn test_balanced_content() {
        let report = validate("<h1>T</h1><p>a<br>b</p><img src=\"x\"><ul><li>x</li></ul>");
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_small_imbalance_tolerated() {
        let report = validate("<div><div><p>x</p>");
        assert!(report.is_valid);
    }

    #[test]
    fn test_large_imbalance_reported() {
        let report = validate("<div><div><div><p>x</p><SPAN></span></span></span></span>");
        assert!(!report.is_valid);
        assert_eq!(
            report.errors,
            vec![
                "Unbalanced tags detected: div".to_string(),
                "Unbalanced tags detected: span".to_string(),
            ]
        );
    }

    #[test]
    fn test_self_closing_ignored() {
        let report = validate("<x/><x/><x/><x/>");
        assert!(report.is_valid);
    }
}
