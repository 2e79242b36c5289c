//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`
//! and everything else that needs I/O: reading template directories, answers
//! files and the built-in Python project template.

pub mod answers;
pub mod builtin_templates;
pub mod filesystem;
pub mod renderer;
pub mod template_loader;

// Re-export commonly used adapters
pub use answers::{load_answers, parse_assignment};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::StrictRenderer;
pub use template_loader::FilesystemTemplateLoader;
