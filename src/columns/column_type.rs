use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ColumnError;

/// The value domain of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Date,
    Select,
    Multiselect,
    User,
    Checkbox,
}

impl ColumnType {
    pub const ALL: [ColumnType; 7] = [
        ColumnType::Text,
        ColumnType::Number,
        ColumnType::Date,
        ColumnType::Select,
        ColumnType::Multiselect,
        ColumnType::User,
        ColumnType::Checkbox,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Select => "select",
            ColumnType::Multiselect => "multiselect",
            ColumnType::User => "user",
            ColumnType::Checkbox => "checkbox",
        }
    }

    /// Human-readable name used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Text => "Text",
            ColumnType::Number => "Number",
            ColumnType::Date => "Date",
            ColumnType::Select => "Single select",
            ColumnType::Multiselect => "Multi select",
            ColumnType::User => "Person",
            ColumnType::Checkbox => "Checkbox",
        }
    }

    /// Enumerated types carry an option list.
    pub fn is_enumerated(&self) -> bool {
        matches!(self, ColumnType::Select | ColumnType::Multiselect)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ColumnType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == normalized)
            .ok_or_else(|| ColumnError::UnknownType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_stored_name() {
        for ty in ColumnType::ALL {
            assert_eq!(ty.as_str().parse::<ColumnType>().unwrap(), ty);
        }
        assert_eq!(
            " Select ".parse::<ColumnType>().unwrap(),
            ColumnType::Select
        );
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "rating".parse::<ColumnType>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown column type: rating");
    }

    #[test]
    fn only_select_types_are_enumerated() {
        let enumerated: Vec<_> = ColumnType::ALL
            .into_iter()
            .filter(ColumnType::is_enumerated)
            .collect();
        assert_eq!(
            enumerated,
            vec![ColumnType::Select, ColumnType::Multiselect]
        );
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&ColumnType::Multiselect).unwrap();
        assert_eq!(json, "\"multiselect\"");
    }
}
