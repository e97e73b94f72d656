//! The fixed option colour palette.
//!
//! Options of select and multiselect columns may only use one of these sixteen
//! colours. Colours are stored as upper-case `#RRGGBB` hex and parsed back from
//! either their hex code or their name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ColumnError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OptionColor {
    #[default]
    Gray,
    Red,
    Orange,
    Amber,
    Yellow,
    Lime,
    Green,
    Emerald,
    Teal,
    Cyan,
    Sky,
    Blue,
    Indigo,
    Violet,
    Purple,
    Pink,
}

impl OptionColor {
    pub const PALETTE: [OptionColor; 16] = [
        OptionColor::Gray,
        OptionColor::Red,
        OptionColor::Orange,
        OptionColor::Amber,
        OptionColor::Yellow,
        OptionColor::Lime,
        OptionColor::Green,
        OptionColor::Emerald,
        OptionColor::Teal,
        OptionColor::Cyan,
        OptionColor::Sky,
        OptionColor::Blue,
        OptionColor::Indigo,
        OptionColor::Violet,
        OptionColor::Purple,
        OptionColor::Pink,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OptionColor::Gray => "gray",
            OptionColor::Red => "red",
            OptionColor::Orange => "orange",
            OptionColor::Amber => "amber",
            OptionColor::Yellow => "yellow",
            OptionColor::Lime => "lime",
            OptionColor::Green => "green",
            OptionColor::Emerald => "emerald",
            OptionColor::Teal => "teal",
            OptionColor::Cyan => "cyan",
            OptionColor::Sky => "sky",
            OptionColor::Blue => "blue",
            OptionColor::Indigo => "indigo",
            OptionColor::Violet => "violet",
            OptionColor::Purple => "purple",
            OptionColor::Pink => "pink",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            OptionColor::Gray => "#6B7280",
            OptionColor::Red => "#EF4444",
            OptionColor::Orange => "#F97316",
            OptionColor::Amber => "#F59E0B",
            OptionColor::Yellow => "#EAB308",
            OptionColor::Lime => "#84CC16",
            OptionColor::Green => "#22C55E",
            OptionColor::Emerald => "#10B981",
            OptionColor::Teal => "#14B8A6",
            OptionColor::Cyan => "#06B6D4",
            OptionColor::Sky => "#0EA5E9",
            OptionColor::Blue => "#3B82F6",
            OptionColor::Indigo => "#6366F1",
            OptionColor::Violet => "#8B5CF6",
            OptionColor::Purple => "#A855F7",
            OptionColor::Pink => "#EC4899",
        }
    }

    /// Colour handed to the `index`-th option of a column when none is chosen.
    pub fn for_index(index: usize) -> OptionColor {
        Self::PALETTE[index % Self::PALETTE.len()]
    }
}

impl fmt::Display for OptionColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

impl FromStr for OptionColor {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = if trimmed.starts_with('#') {
            trimmed.to_ascii_uppercase()
        } else {
            format!("#{}", trimmed.to_ascii_uppercase())
        };
        let name = trimmed.to_ascii_lowercase();

        Self::PALETTE
            .into_iter()
            .find(|color| color.hex() == hex || color.name() == name)
            .ok_or_else(|| ColumnError::UnknownColor(s.to_string()))
    }
}

impl TryFrom<String> for OptionColor {
    type Error = ColumnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OptionColor> for String {
    fn from(color: OptionColor) -> Self {
        color.hex().to_string()
    }
}
