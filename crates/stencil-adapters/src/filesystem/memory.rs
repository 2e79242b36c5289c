//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use stencil_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, WalkEntry},
    },
    error::StencilResult,
};

/// In-memory filesystem for testing.
///
/// Paths are stored as given; callers are expected to use one root
/// consistently (absolute or relative).
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
    executables: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn is_dir(&self, path: &Path) -> bool {
        self.directories.contains(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }

    fn has_children(&self, path: &Path) -> bool {
        self.files.keys().any(|p| p.parent() == Some(path))
            || self.directories.iter().any(|p| p.parent() == Some(path))
    }

    fn add_ancestors(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_ancestors(parent);
            }
            inner
                .files
                .insert(path.to_path_buf(), content.as_ref().to_vec());
        }
        self
    }

    /// Seed an empty directory (testing helper).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.add_ancestors(path.as_ref());
        }
        self
    }

    /// Read a file's content as text.
    pub fn contents(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        let bytes = inner.files.get(path)?;
        String::from_utf8(bytes.clone()).ok()
    }

    /// Whether the file at `path` has been marked executable.
    pub fn is_executable(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.executables.contains(path))
            .unwrap_or(false)
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let Ok(inner) = self.inner.read() else {
            return Vec::new();
        };
        let mut files: Vec<_> = inner.files.keys().cloned().collect();
        files.sort();
        files
    }

    /// Every file and directory below `root`, relative to it, with file
    /// contents. Directories map to `None`.
    pub fn snapshot(&self, root: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
        let Ok(inner) = self.inner.read() else {
            return BTreeMap::new();
        };
        let files = inner
            .files
            .iter()
            .filter_map(|(p, c)| Some((p.strip_prefix(root).ok()?.to_path_buf(), Some(c.clone()))));
        let dirs = inner
            .directories
            .iter()
            .filter(|p| p.as_path() != root)
            .filter_map(|p| Some((p.strip_prefix(root).ok()?.to_path_buf(), None)));
        files.chain(dirs).collect()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
            inner.executables.clear();
        }
    }

    fn read(&self, path: &Path) -> StencilResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_error(path))
    }

    fn write(&self, path: &Path) -> StencilResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_error(path))
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        let mut inner = self.write(path)?;
        if inner.files.contains_key(path) {
            return Err(fs_error(path, "a file exists at this path"));
        }
        inner.add_ancestors(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> StencilResult<()> {
        let mut inner = self.write(path)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.is_dir(parent) {
                return Err(fs_error(path, "Parent directory does not exist"));
            }
        }
        if inner.is_dir(path) {
            return Err(fs_error(path, "a directory exists at this path"));
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> StencilResult<Vec<u8>> {
        self.read(path)?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| fs_error(path, "No such file"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.exists(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.is_dir(path))
            .unwrap_or(false)
    }

    fn remove_file(&self, path: &Path) -> StencilResult<()> {
        let mut inner = self.write(path)?;
        inner.executables.remove(path);
        inner
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| fs_error(path, "No such file"))
    }

    fn remove_dir_all(&self, path: &Path) -> StencilResult<()> {
        let mut inner = self.write(path)?;
        if !inner.is_dir(path) {
            return Err(fs_error(path, "No such directory"));
        }

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.executables.retain(|p| !p.starts_with(path));

        Ok(())
    }

    fn remove_empty_dir(&self, path: &Path) -> StencilResult<bool> {
        let mut inner = self.write(path)?;
        if !inner.is_dir(path) || inner.has_children(path) {
            return Ok(false);
        }
        inner.directories.remove(path);
        Ok(true)
    }

    fn rename(&self, from: &Path, to: &Path) -> StencilResult<()> {
        let mut inner = self.write(from)?;
        if !inner.exists(from) {
            return Err(fs_error(from, "No such file or directory"));
        }
        if inner.exists(to) {
            return Err(fs_error(to, "destination already exists"));
        }

        let moved_files: Vec<_> = inner
            .files
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for old in moved_files {
            if let (Some(content), Ok(rest)) = (inner.files.remove(&old), old.strip_prefix(from)) {
                let new = join(to, rest);
                if inner.executables.remove(&old) {
                    inner.executables.insert(new.clone());
                }
                inner.files.insert(new, content);
            }
        }

        let moved_dirs: Vec<_> = inner
            .directories
            .iter()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for old in moved_dirs {
            inner.directories.remove(&old);
            if let Ok(rest) = old.strip_prefix(from) {
                inner.directories.insert(join(to, rest));
            }
        }
        Ok(())
    }

    fn set_executable(&self, path: &Path) -> StencilResult<bool> {
        let mut inner = self.write(path)?;
        if !inner.files.contains_key(path) {
            return Err(fs_error(path, "No such file"));
        }
        Ok(inner.executables.insert(path.to_path_buf()))
    }

    fn walk(&self, root: &Path) -> StencilResult<Vec<WalkEntry>> {
        let inner = self.read(root)?;
        if !inner.is_dir(root) {
            return Err(fs_error(root, "Failed to walk directory: not a directory"));
        }

        let below = |p: &PathBuf| -> Option<PathBuf> {
            let rest = p.strip_prefix(root).ok()?;
            (!rest.as_os_str().is_empty()).then(|| rest.to_path_buf())
        };
        let mut entries: Vec<_> = inner
            .directories
            .iter()
            .filter_map(|p| below(p).map(WalkEntry::dir))
            .chain(inner.files.keys().filter_map(|p| below(p).map(WalkEntry::file)))
            .collect();

        // Component-wise path order is a depth-first pre-order.
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}

fn join(base: &Path, rest: &Path) -> PathBuf {
    if rest.as_os_str().is_empty() {
        base.to_path_buf()
    } else {
        base.join(rest)
    }
}

fn fs_error(path: &Path, reason: &str) -> stencil_core::error::StencilError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

fn lock_error(path: &Path) -> stencil_core::error::StencilError {
    fs_error(path, "memory filesystem lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn walk_lists_parents_before_children() {
        let fs = MemoryFilesystem::new()
            .with_file("/out/b/z.txt", "z")
            .with_file("/out/b/a.txt", "a")
            .with_file("/out/a.txt", "a")
            .with_dir("/out/c");

        let walked = fs.walk(Path::new("/out")).unwrap();
        assert_eq!(
            walked,
            vec![
                WalkEntry::file("a.txt"),
                WalkEntry::dir("b"),
                WalkEntry::file("b/a.txt"),
                WalkEntry::file("b/z.txt"),
                WalkEntry::dir("c"),
            ]
        );
    }

    #[test]
    fn rename_moves_the_whole_subtree() {
        let fs = MemoryFilesystem::new()
            .with_file("/out/src/__namespace__/pkg/__init__.py", "")
            .with_file("/out/src/__namespace__/pkg/main.py", "print()");

        fs.rename(
            Path::new("/out/src/__namespace__"),
            Path::new("/out/src/acme"),
        )
        .unwrap();

        assert!(!fs.exists(Path::new("/out/src/__namespace__")));
        assert!(fs.is_dir(Path::new("/out/src/acme/pkg")));
        assert_eq!(
            fs.contents(Path::new("/out/src/acme/pkg/main.py")).as_deref(),
            Some("print()")
        );
    }

    #[test]
    fn executable_bit_follows_renames_and_is_reported_once() {
        let fs = MemoryFilesystem::new().with_file("/out/pkg/setup.py", "");

        assert!(fs.set_executable(Path::new("/out/pkg/setup.py")).unwrap());
        assert!(!fs.set_executable(Path::new("/out/pkg/setup.py")).unwrap());

        fs.rename(Path::new("/out/pkg"), Path::new("/out/tools"))
            .unwrap();
        assert!(fs.is_executable(Path::new("/out/tools/setup.py")));
        assert!(!fs.is_executable(Path::new("/out/pkg/setup.py")));

        fs.remove_file(Path::new("/out/tools/setup.py")).unwrap();
        assert!(!fs.is_executable(Path::new("/out/tools/setup.py")));
        assert!(fs.set_executable(Path::new("/out/tools/setup.py")).is_err());
    }

    #[test]
    fn rename_refuses_existing_destination() {
        let fs = MemoryFilesystem::new()
            .with_file("/out/a.txt", "a")
            .with_file("/out/b.txt", "b");
        assert!(
            fs.rename(Path::new("/out/a.txt"), Path::new("/out/b.txt"))
                .is_err()
        );
        assert_eq!(fs.contents(Path::new("/out/b.txt")).as_deref(), Some("b"));
    }

    #[test]
    fn remove_empty_dir_only_removes_empty_directories() {
        let fs = MemoryFilesystem::new()
            .with_file("/out/full/file.txt", "x")
            .with_dir("/out/empty");

        assert!(!fs.remove_empty_dir(Path::new("/out/full")).unwrap());
        assert!(fs.remove_empty_dir(Path::new("/out/empty")).unwrap());
        assert!(!fs.exists(Path::new("/out/empty")));
    }

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/out/a.txt"), b"a").is_err());

        fs.create_dir_all(Path::new("/out")).unwrap();
        fs.write_file(Path::new("/out/a.txt"), b"a").unwrap();
        assert_eq!(fs.read_file(Path::new("/out/a.txt")).unwrap(), b"a");
    }

    #[test]
    fn remove_dir_all_removes_descendants_only() {
        let fs = MemoryFilesystem::new()
            .with_file("/out/docs/index.md", "x")
            .with_file("/out/docsite/index.md", "y");

        fs.remove_dir_all(Path::new("/out/docs")).unwrap();
        assert_eq!(
            fs.list_files(),
            vec![PathBuf::from("/out/docsite/index.md")]
        );
    }
}
