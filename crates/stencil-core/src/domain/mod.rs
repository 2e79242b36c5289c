//! Core domain layer for Stencil.
//!
//! Pure logic only: no filesystem, no process, no terminal. Everything that
//! touches the outside world goes through the ports in
//! [`crate::application::ports`].
//!
//! - **Pre-generation**: [`VariableDecl`] + [`Rule`] declarations collected in
//!   a [`TemplateSchema`], which turns [`RawAnswers`] into a [`Configuration`]
//! - **Post-generation**: [`ActionRule`]s compiled into an [`ActionPlan`]
//!   that answers [`FileAction`] per path; deferred `.j2` files are rendered
//!   by [`jinja`]
pub mod actions;
pub mod error;
pub mod interpolate;
pub mod jinja;
pub mod paths;
pub mod project_structure;
pub mod rules;
pub mod template;
pub mod validation;
pub mod value;

pub use actions::{ActionPlan, ActionRule, Condition, FileAction};
pub use error::{RenderError, TemplateError, TransformError, ValidationError};
pub use interpolate::{PlaceholderError, UndefinedVariable};
pub use jinja::{DEFERRED_SUFFIX, JinjaError};
pub use paths::{FileName, PathError, RelativePath};
pub use project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure};
pub use rules::{
    EMAIL_PATTERN, IDENTIFIER_PATTERN, Pattern, REMOVE_ME, Rule, VariableDecl, VariableKind,
    WORD_PATTERN, parse_bool,
};
pub use template::{
    DirectorySpec, FileSpec, Template, TemplateBuilder, TemplateContent, TemplateMetadata,
    TemplateNode, TemplateSource, TemplateTree,
};
pub use validation::{TemplateSchema, ValidationMode};
pub use value::{Configuration, RawAnswers, Selection, Value};
