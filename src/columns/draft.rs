use serde::Serialize;

use super::column_type::ColumnType;
use super::option::OptionDraft;
use super::palette::OptionColor;
use super::ColumnRecord;
use crate::errors::{ColumnError, ColumnResult};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MIN_WIDTH: i32 = 60;
pub const MAX_WIDTH: i32 = 600;
pub const DEFAULT_WIDTH: i32 = 150;

/// A column definition under construction.
///
/// Every mutation keeps the option invariant: non-enumerated types never hold
/// options. Whether an enumerated draft has *enough* options is only checked by
/// [`ColumnDraft::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnDraft {
    name: String,
    column_type: ColumnType,
    width: i32,
    visible: bool,
    is_default: bool,
    options: Vec<OptionDraft>,
}

impl ColumnDraft {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            width: DEFAULT_WIDTH,
            visible: true,
            is_default: false,
            options: Vec::new(),
        }
    }

    /// A draft for one of the columns every project is created with.
    pub fn new_default(name: impl Into<String>, column_type: ColumnType) -> Self {
        let mut draft = Self::new(name, column_type);
        draft.is_default = true;
        draft
    }

    pub fn from_record(record: &ColumnRecord) -> Self {
        Self {
            name: record.name.clone(),
            column_type: record.column_type,
            width: record.width,
            visible: record.visible,
            is_default: record.is_default,
            options: record
                .options
                .iter()
                .map(|option| OptionDraft {
                    label: option.label.clone(),
                    value: option.value.clone(),
                    color: option.color,
                })
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn options(&self) -> &[OptionDraft] {
        &self.options
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Change the column type.
    ///
    /// Default columns keep their type. Leaving the enumerated types drops the
    /// option list; switching between select and multiselect keeps it.
    pub fn set_type(&mut self, column_type: ColumnType) -> ColumnResult<()> {
        if column_type == self.column_type {
            return Ok(());
        }
        if self.is_default {
            return Err(ColumnError::DefaultTypeLocked);
        }
        if !column_type.is_enumerated() {
            self.options.clear();
        }
        self.column_type = column_type;
        Ok(())
    }

    /// Set the width in pixels, clamped to the allowed range. Returns the stored width.
    pub fn set_width(&mut self, width: i32) -> i32 {
        self.width = width.clamp(MIN_WIDTH, MAX_WIDTH);
        self.width
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Append an option. The colour defaults to the next palette entry.
    ///
    /// Options can only be added while the draft has an enumerated type.
    pub fn add_option(
        &mut self,
        label: &str,
        value: Option<&str>,
        color: Option<OptionColor>,
    ) -> ColumnResult<()> {
        if label.trim().is_empty() {
            return Err(ColumnError::OptionLabelRequired);
        }
        if !self.column_type.is_enumerated() {
            return Err(ColumnError::OptionsNotAllowed(
                self.column_type.label().to_string(),
            ));
        }
        let color = color.unwrap_or_else(|| OptionColor::for_index(self.options.len()));
        self.options.push(OptionDraft::new(label, value, color));
        Ok(())
    }

    /// Replace the option at `index`. A blank value is re-derived from the new label.
    pub fn update_option(
        &mut self,
        index: usize,
        label: &str,
        value: Option<&str>,
        color: Option<OptionColor>,
    ) -> ColumnResult<()> {
        if label.trim().is_empty() {
            return Err(ColumnError::OptionLabelRequired);
        }
        let slot = self
            .options
            .get_mut(index)
            .ok_or(ColumnError::OptionNotFound(index))?;
        let color = color.unwrap_or(slot.color);
        *slot = OptionDraft::new(label, value, color);
        Ok(())
    }

    pub fn remove_option(&mut self, index: usize) -> ColumnResult<OptionDraft> {
        if index >= self.options.len() {
            return Err(ColumnError::OptionNotFound(index));
        }
        Ok(self.options.remove(index))
    }

    /// Move an option to a new position, shifting the ones in between.
    pub fn move_option(&mut self, from: usize, to: usize) -> ColumnResult<()> {
        if from >= self.options.len() {
            return Err(ColumnError::OptionNotFound(from));
        }
        if to >= self.options.len() {
            return Err(ColumnError::OptionNotFound(to));
        }
        let option = self.options.remove(from);
        self.options.insert(to, option);
        Ok(())
    }

    /// Check the draft can be persisted.
    pub fn validate(&self) -> ColumnResult<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ColumnError::NameRequired);
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(ColumnError::NameTooLong {
                max: MAX_NAME_LENGTH,
            });
        }
        if self.column_type.is_enumerated() && self.options.is_empty() {
            return Err(ColumnError::OptionsRequired);
        }
        Ok(())
    }
}
