//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService, Transformer)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    AppliedAction, GenerateOptions, GeneratePlan, GenerateReport, GenerateService,
    TransformPreview, TransformReport, TransformWarning, Transformer,
};

pub use ports::{Filesystem, TemplateRenderer, WalkEntry};

pub use error::ApplicationError;
