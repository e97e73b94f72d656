//! Domain-specific error types for taskboard
//!
//! # Error Categories
//!
//! - **ColumnError**: column drafts, the column editor and column persistence
//! - **TemplateError**: template catalog, tenant templates and template application
//!
//! Orchestration code (project creation, seeding, reports, the CLI) uses
//! `anyhow::Result` and wraps these where it needs context.
//!
//! # Examples
//!
//! ```rust
//! use taskboard::errors::ColumnError;
//!
//! let err = ColumnError::OptionsRequired;
//! assert!(err.is_client_error());
//! assert_eq!(err.error_code(), "VALIDATION_FAILED");
//! ```

pub mod column;
pub mod template;

pub use column::ColumnError;
pub use template::TemplateError;

/// Result type alias for column operations
pub type ColumnResult<T> = Result<T, ColumnError>;

/// Result type alias for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;
