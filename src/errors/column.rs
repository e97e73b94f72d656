//! Column-related error types
//!
//! Covers draft validation, editor state and the persistence boundary. The
//! `Display` output of every variant is what the column editor shows in its
//! error slot, so messages are written for end users.

use thiserror::Error;

/// Column-related errors
#[derive(Error, Debug)]
pub enum ColumnError {
    /// Draft has a blank name
    #[error("Column name is required")]
    NameRequired,

    /// Draft name exceeds the maximum length
    #[error("Column name must be {max} characters or fewer")]
    NameTooLong {
        /// Maximum number of characters allowed
        max: usize,
    },

    /// Enumerated column without options
    #[error("Please add at least one option")]
    OptionsRequired,

    /// Option added or edited with a blank label
    #[error("Option label is required")]
    OptionLabelRequired,

    /// Option added to a column type without an option list
    #[error("{0} columns do not have options")]
    OptionsNotAllowed(String),

    /// Two or more options of one column share a value
    #[error("Option values must be unique within a column: {0}")]
    DuplicateOptionValues(String),

    /// Option index outside the draft's option list
    #[error("Option {0} does not exist")]
    OptionNotFound(usize),

    /// Unknown column type name
    #[error("Unknown column type: {0}")]
    UnknownType(String),

    /// Colour outside the fixed palette
    #[error("Unknown option color: {0}")]
    UnknownColor(String),

    /// Type change attempted on a default column
    #[error("The type of a default column cannot be changed")]
    DefaultTypeLocked,

    /// Delete attempted on a default column
    #[error("Default columns cannot be deleted")]
    DefaultColumnLocked,

    /// A submission is already in flight for this editor
    #[error("A save is already in progress")]
    SubmissionInProgress,

    /// Project not found by ID
    #[error("Project {0} not found")]
    ProjectNotFound(i32),

    /// Column not found within the project
    #[error("Column {column_id} not found in project {project_id}")]
    NotFound {
        /// Owning project
        project_id: i32,
        /// Requested column
        column_id: i32,
    },

    /// Stored row could not be mapped back to the column model
    #[error("Corrupt column data: {0}")]
    CorruptRecord(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl ColumnError {
    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ColumnError::NameRequired
                | ColumnError::NameTooLong { .. }
                | ColumnError::OptionsRequired
                | ColumnError::OptionLabelRequired
                | ColumnError::OptionsNotAllowed(_)
                | ColumnError::DuplicateOptionValues(_)
                | ColumnError::OptionNotFound(_)
                | ColumnError::UnknownType(_)
                | ColumnError::UnknownColor(_)
                | ColumnError::DefaultTypeLocked
                | ColumnError::DefaultColumnLocked
                | ColumnError::SubmissionInProgress
        )
    }

    /// Check if this is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ColumnError::ProjectNotFound(_) | ColumnError::NotFound { .. }
        )
    }

    /// Get error code for API responses and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            ColumnError::NameRequired
            | ColumnError::NameTooLong { .. }
            | ColumnError::OptionsRequired
            | ColumnError::OptionLabelRequired
            | ColumnError::OptionsNotAllowed(_)
            | ColumnError::DuplicateOptionValues(_)
            | ColumnError::OptionNotFound(_)
            | ColumnError::UnknownType(_)
            | ColumnError::UnknownColor(_) => "VALIDATION_FAILED",
            ColumnError::DefaultTypeLocked | ColumnError::DefaultColumnLocked => "FORBIDDEN",
            ColumnError::SubmissionInProgress => "CONFLICT",
            ColumnError::ProjectNotFound(_) | ColumnError::NotFound { .. } => "NOT_FOUND",
            ColumnError::CorruptRecord(_) => "INTERNAL",
            ColumnError::Database(_) => "DATABASE_ERROR",
        }
    }
}
