//! The column model: typed, user-extensible task attributes of a project.
//!
//! A [`ColumnDraft`] is edited through a [`ColumnEditor`] session and handed to a
//! [`ColumnStore`] on submit. Persisted columns come back as [`ColumnRecord`]s.

pub mod column_type;
pub mod draft;
pub mod editor;
pub mod option;
pub mod palette;
pub mod store;

pub use column_type::ColumnType;
pub use draft::{ColumnDraft, DEFAULT_WIDTH, MAX_NAME_LENGTH, MAX_WIDTH, MIN_WIDTH};
pub use editor::{ColumnEditor, ColumnSubmission, EditorMode};
pub use option::{derive_option_value, duplicate_values, OptionDraft};
pub use palette::OptionColor;
pub use store::ColumnStore;

use serde::Serialize;

/// A persisted column with its options in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnRecord {
    pub id: i32,
    pub project_id: i32,
    pub name: String,
    pub column_type: ColumnType,
    pub width: i32,
    pub visible: bool,
    pub is_default: bool,
    pub position: i32,
    pub options: Vec<ColumnOption>,
}

/// A persisted option of an enumerated column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnOption {
    pub id: i32,
    pub label: String,
    pub value: String,
    pub color: OptionColor,
    pub position: i32,
}
