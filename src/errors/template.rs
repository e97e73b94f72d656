//! Template-related error types

use thiserror::Error;

use super::ColumnError;

/// Template-related errors
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Template not found by ID
    #[error("Template {0} not found")]
    NotFound(i32),

    /// Template belongs to a different workspace
    #[error("Template {template_id} is not available to workspace {workspace_id}")]
    NotInWorkspace {
        /// Requested template
        template_id: i32,
        /// Workspace asking for it
        workspace_id: i32,
    },

    /// Project used as a template source is missing or lives in another workspace
    #[error("Project {project_id} not found in workspace {workspace_id}")]
    ProjectNotInWorkspace {
        /// Source project
        project_id: i32,
        /// Workspace the template is created in
        workspace_id: i32,
    },

    /// Invalid template name or description
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Stored sections/columns payload could not be decoded
    #[error("Invalid template payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// One of the template's columns is not a valid column
    #[error("Invalid template column '{name}': {source}")]
    InvalidColumn {
        /// Column name as written in the template
        name: String,
        /// Underlying column error
        #[source]
        source: ColumnError,
    },

    /// Reading or writing project columns failed
    #[error(transparent)]
    Column(#[from] ColumnError),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl TemplateError {
    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TemplateError::Validation(_)
                | TemplateError::InvalidColumn { .. }
                | TemplateError::NotInWorkspace { .. }
        ) || matches!(self, TemplateError::Column(err) if err.is_client_error())
    }

    /// Get error code for API responses and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            TemplateError::NotFound(_) | TemplateError::ProjectNotInWorkspace { .. } => {
                "NOT_FOUND"
            }
            TemplateError::NotInWorkspace { .. } => "FORBIDDEN",
            TemplateError::Validation(_) | TemplateError::InvalidColumn { .. } => {
                "VALIDATION_FAILED"
            }
            TemplateError::InvalidPayload(_) => "INTERNAL",
            TemplateError::Column(err) => err.error_code(),
            TemplateError::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found() {
        let err = TemplateError::NotFound(4);
        assert_eq!(err.to_string(), "Template 4 not found");
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_invalid_column_wraps_source() {
        let err = TemplateError::InvalidColumn {
            name: "Stage".to_string(),
            source: ColumnError::OptionsRequired,
        };
        assert_eq!(
            err.to_string(),
            "Invalid template column 'Stage': Please add at least one option"
        );
        assert!(err.is_client_error());
    }
}
