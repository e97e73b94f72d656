use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::palette::OptionColor;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Derive an option value from its label: lower-cased, whitespace runs collapsed
/// into single hyphens.
///
/// No collision check is made against the other options of the column.
pub fn derive_option_value(label: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&label.trim().to_lowercase(), "-")
        .into_owned()
}

/// One labelled, coloured choice of an enumerated column, as edited in a draft.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDraft {
    pub label: String,
    pub value: String,
    pub color: OptionColor,
}

impl OptionDraft {
    /// Build an option, deriving the value from the label when `value` is blank.
    pub fn new(label: &str, value: Option<&str>, color: OptionColor) -> Self {
        let label = label.trim().to_string();
        let value = match value.map(str::trim) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => derive_option_value(&label),
        };
        Self {
            label,
            value,
            color,
        }
    }
}

/// Values that appear on more than one option, in first-seen order.
pub fn duplicate_values(options: &[OptionDraft]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut duplicates = Vec::new();
    for option in options {
        if !seen.insert(option.value.as_str()) && !duplicates.contains(&option.value) {
            duplicates.push(option.value.clone());
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_hyphenated_lowercase_value() {
        assert_eq!(derive_option_value("In Progress"), "in-progress");
        assert_eq!(
            derive_option_value("  Ready \t for   Review "),
            "ready-for-review"
        );
        assert_eq!(derive_option_value("Done"), "done");
    }

    #[test]
    fn keeps_typed_value() {
        let option = OptionDraft::new("In Progress", Some("wip"), OptionColor::Blue);
        assert_eq!(option.value, "wip");
        assert_eq!(option.label, "In Progress");
    }

    #[test]
    fn blank_value_falls_back_to_label() {
        let option = OptionDraft::new("Blocked", Some("   "), OptionColor::Red);
        assert_eq!(option.value, "blocked");
    }

    #[test]
    fn reports_duplicate_values_once() {
        let options = vec![
            OptionDraft::new("In Progress", None, OptionColor::Blue),
            OptionDraft::new("in   progress", None, OptionColor::Red),
            OptionDraft::new("IN PROGRESS", None, OptionColor::Green),
            OptionDraft::new("Done", None, OptionColor::Green),
        ];
        assert_eq!(duplicate_values(&options), vec!["in-progress".to_string()]);
    }
}
