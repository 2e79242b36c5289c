//! Unified error handling for Stencil Core.
//!
//! Wraps the domain and application errors behind one type with
//! user-actionable suggestions and a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{RenderError, TemplateError, TransformError, ValidationError};

/// Root error type for Stencil Core operations.
#[derive(Debug, Error, Clone)]
pub enum StencilError {
    /// An answer failed its declared rules.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The rendered tree could not be transformed.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// The template could not be rendered with this configuration.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The template definition itself is broken.
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Errors from the application layer (orchestration and I/O).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl StencilError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation(e) => e.suggestions(),
            Self::Transform(e) => e.suggestions(),
            Self::Render(e) => e.suggestions(),
            Self::Template(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Stencil".into(),
                "Please report this issue at: https://github.com/cosecruz/stencil/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Render(RenderError::UndefinedVariable { .. }) => ErrorCategory::Validation,
            Self::Render(RenderError::UnsupportedExpression { .. }) => {
                ErrorCategory::Configuration
            }
            Self::Transform(_) | Self::Render(_) => ErrorCategory::Transform,
            Self::Application(e) => e.category(),
            Self::Template(_) | Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The variable an error is about, if any.
    pub fn variable(&self) -> Option<&str> {
        match self {
            Self::Validation(e) => Some(e.variable()),
            Self::Render(RenderError::UndefinedVariable { variable, .. })
            | Self::Transform(TransformError::UndefinedVariable { variable, .. })
            | Self::Template(TemplateError::UndeclaredVariable { variable, .. }) => Some(variable),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Transform,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type StencilResult<T> = Result<T, StencilError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    fn context(self, msg: impl Into<String>) -> StencilResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> StencilResult<T> {
        self.map_err(|e| StencilError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
