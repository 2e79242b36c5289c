//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! logic. Business logic errors live in `crate::domain::error`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {}", path.display())]
    ProjectExists { path: PathBuf },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {}: {reason}", path.display())]
    RollbackFailed { path: PathBuf, reason: String },

    /// Answers file could not be read or parsed.
    #[error("Invalid answers file {}: {reason}", path.display())]
    InvalidAnswers { path: PathBuf, reason: String },

    /// Template directory does not exist.
    #[error("Template not found at {}", path.display())]
    TemplateNotFound { path: PathBuf },
}

impl ApplicationError {
    /// Convenience constructor from an I/O error.
    pub fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Choose a different output directory".into(),
            ],
            Self::InvalidAnswers { .. } => vec![
                "Answers files are TOML (.toml) or JSON (.json) tables".into(),
                "Values must be strings, booleans or numbers".into(),
            ],
            Self::TemplateNotFound { .. } => vec![
                "Check the template directory path".into(),
                "Or set templates.default_dir in your config".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![format!(
                "Remove {} manually before retrying",
                path.display()
            )],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::RollbackFailed { .. } => ErrorCategory::Internal,
            Self::ProjectExists { .. } | Self::InvalidAnswers { .. } => ErrorCategory::Validation,
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
        }
    }
}
