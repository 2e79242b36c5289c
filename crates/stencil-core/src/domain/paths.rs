//! Paths that are guaranteed to stay inside the output root.

use std::borrow::Borrow;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::domain::error::{RenderError, TransformError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("absolute paths are not allowed")]
    Absolute,
    #[error("path escapes the output root")]
    Escapes,
    #[error("path is empty")]
    Empty,
    #[error("'{0}' is not a single file name")]
    NotAName(String),
}

impl PathError {
    pub(crate) fn into_transform(self, path: impl fmt::Display) -> TransformError {
        TransformError::PathEscape {
            path: path.to_string(),
            reason: self.to_string(),
        }
    }

    pub fn into_render(self, path: impl fmt::Display) -> RenderError {
        RenderError::InvalidPath {
            path: path.to_string(),
            reason: self.to_string(),
        }
    }
}

// ── RelativePath ─────────────────────────────────────────────────────────────

/// A lexically normalised path relative to the output root.
///
/// Invariant: never absolute, never empty, and no `..` component survives
/// normalisation. `a/./b/../c` becomes `a/c`; `a/../../c` is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    pub fn try_new(path: impl AsRef<Path>) -> Result<Self, PathError> {
        let mut normalised = PathBuf::new();
        for component in path.as_ref().components() {
            match component {
                Component::Prefix(_) | Component::RootDir => return Err(PathError::Absolute),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalised.pop() {
                        return Err(PathError::Escapes);
                    }
                }
                Component::Normal(part) => normalised.push(part),
            }
        }
        if normalised.as_os_str().is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self(normalised))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Number of components; `a/b/c` has depth 3.
    pub fn depth(&self) -> usize {
        self.0.components().count()
    }

    /// Parent path, or `None` for top-level entries.
    pub fn parent(&self) -> Option<Self> {
        self.0
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| Self(p.to_path_buf()))
    }

    pub fn file_name(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Same parent, different final component.
    pub fn with_file_name(&self, name: &FileName) -> Self {
        Self(self.0.with_file_name(name.as_str()))
    }

    /// Whether `ancestor` is this path or one of its parents.
    pub fn starts_with(&self, ancestor: &Self) -> bool {
        self.0.starts_with(&ancestor.0)
    }

    /// Replace the `from` prefix with `to`; `None` if `from` is not a prefix.
    pub fn rebase(&self, from: &Self, to: &Self) -> Option<Self> {
        self.0
            .strip_prefix(&from.0)
            .ok()
            .map(|rest| Self(to.0.join(rest)))
    }

    /// Absolute location under `root`.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Borrow<Path> for RelativePath {
    fn borrow(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

// ── FileName ─────────────────────────────────────────────────────────────────

/// A single path segment: no separators, not `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileName(String);

impl FileName {
    pub fn try_new(name: impl Into<String>) -> Result<Self, PathError> {
        let name = name.into();
        if name.is_empty() {
            return Err(PathError::Empty);
        }
        if name == ".." {
            return Err(PathError::Escapes);
        }
        if name == "." || name.contains(['/', '\\', '\0']) {
            return Err(PathError::NotAName(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
