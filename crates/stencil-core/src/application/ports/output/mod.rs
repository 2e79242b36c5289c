//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{Configuration, ProjectStructure, Template};
use crate::error::StencilResult;

/// One entry found while walking a directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Path relative to the walk root.
    pub path: PathBuf,
    pub is_dir: bool,
}

impl WalkEntry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Every call is fallible and surfaced; nothing is retried.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &[u8]) -> StencilResult<()>;

    /// Read a whole file.
    fn read_file(&self, path: &Path) -> StencilResult<Vec<u8>>;

    /// Check if path exists (symlinks are not followed).
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn remove_file(&self, path: &Path) -> StencilResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Remove `path` if it is an empty directory; `Ok(false)` otherwise.
    fn remove_empty_dir(&self, path: &Path) -> StencilResult<bool>;

    fn rename(&self, from: &Path, to: &Path) -> StencilResult<()>;

    /// Add execute permission for everyone who can read the file.
    /// `Ok(false)` when it was already executable.
    fn set_executable(&self, path: &Path) -> StencilResult<bool>;

    /// Depth-first walk below `root`, excluding `root` itself.
    ///
    /// Entries are yielded parent before children, siblings sorted by name.
    /// Symlinks are reported as files and never followed.
    fn walk(&self, root: &Path) -> StencilResult<Vec<WalkEntry>>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `stencil_adapters::renderer::StrictRenderer` (placeholder substitution)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render a template into an in-memory project structure.
    ///
    /// # Arguments
    ///
    /// * `template` - The template to render
    /// * `config` - Validated answers
    /// * `output_root` - Root directory for output paths
    fn render(
        &self,
        template: &Template,
        config: &Configuration,
        output_root: &Path,
    ) -> StencilResult<ProjectStructure>;
}
