//! Post-generation transformer.
//!
//! Walks a rendered tree depth-first and asks the [`ActionPlan`] what to do
//! with every visited path. The decisions are then applied in four phases,
//! each in the order the plan hands them out:
//!
//! 1. deletions, deepest first, pruning directories they leave empty
//! 2. renders of deferred `.j2` files into their siblings
//! 3. renames, shallowest first
//! 4. executable bits, following any rename of a parent
//!
//! The walk and decide steps never mutate anything; [`Transformer::preview`]
//! stops there.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::ports::Filesystem,
    domain::{
        ActionPlan, ActionRule, Configuration, FileAction, FileName, RelativePath, TransformError,
        jinja,
    },
    error::{StencilError, StencilResult},
};

// ── Report types ─────────────────────────────────────────────────────────────

/// A filesystem change that was carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppliedAction {
    Deleted(RelativePath),
    /// An empty directory removed after a deletion emptied it.
    Pruned(RelativePath),
    Renamed { from: RelativePath, to: RelativePath },
    /// A deferred file rendered into `to`; the source is gone.
    Rendered { from: RelativePath, to: RelativePath },
    MadeExecutable(RelativePath),
}

impl fmt::Display for AppliedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted(p) => write!(f, "deleted {p}"),
            Self::Pruned(p) => write!(f, "pruned empty directory {p}"),
            Self::Renamed { from, to } => write!(f, "renamed {from} -> {to}"),
            Self::Rendered { from, to } => write!(f, "rendered {from} -> {to}"),
            Self::MadeExecutable(p) => write!(f, "made {p} executable"),
        }
    }
}

/// Something the plan asked for that could not be done, without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformWarning {
    MissingDeleteTarget(RelativePath),
    MissingRenameSource(RelativePath),
    MissingRenderSource(RelativePath),
    MissingChmodTarget(RelativePath),
}

impl TransformWarning {
    fn unvisited(path: &RelativePath, action: &FileAction) -> Self {
        let path = path.clone();
        match action {
            FileAction::RenameTo(_) => Self::MissingRenameSource(path),
            FileAction::Render { .. } => Self::MissingRenderSource(path),
            FileAction::MakeExecutable => Self::MissingChmodTarget(path),
            FileAction::Delete | FileAction::Keep => Self::MissingDeleteTarget(path),
        }
    }
}

impl fmt::Display for TransformWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDeleteTarget(p) => write!(f, "nothing to delete at {p}"),
            Self::MissingRenameSource(p) => write!(f, "nothing to rename at {p}"),
            Self::MissingRenderSource(p) => write!(f, "nothing to render at {p}"),
            Self::MissingChmodTarget(p) => write!(f, "nothing to make executable at {p}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub applied: Vec<AppliedAction>,
    pub warnings: Vec<TransformWarning>,
}

impl TransformReport {
    pub fn deleted(&self) -> usize {
        self.applied
            .iter()
            .filter(|a| matches!(a, AppliedAction::Deleted(_)))
            .count()
    }

    pub fn renamed(&self) -> usize {
        self.applied
            .iter()
            .filter(|a| matches!(a, AppliedAction::Renamed { .. }))
            .count()
    }

    pub fn rendered(&self) -> usize {
        self.applied
            .iter()
            .filter(|a| matches!(a, AppliedAction::Rendered { .. }))
            .count()
    }
}

/// Result of walk + decide: what would happen, without touching disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformPreview {
    /// Visited paths with a non-`Keep` decision, in walk order.
    pub decisions: Vec<(RelativePath, FileAction)>,
    /// Planned paths the walk never reached.
    pub warnings: Vec<TransformWarning>,
}

/// The compiled plan together with what the walk found.
struct Scan {
    plan: ActionPlan,
    visited: HashSet<RelativePath>,
    preview: TransformPreview,
}

// ── Transformer ──────────────────────────────────────────────────────────────

pub struct Transformer<'a> {
    fs: &'a dyn Filesystem,
    rules: &'a [ActionRule],
}

impl<'a> Transformer<'a> {
    pub fn new(fs: &'a dyn Filesystem, rules: &'a [ActionRule]) -> Self {
        Self { fs, rules }
    }

    /// Bring the rendered tree at `root` into its final shape.
    ///
    /// On a failure after at least one change, the error is
    /// [`TransformError::Aborted`] listing what was already done; the tree is
    /// left as it is.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn transform(&self, root: &Path, config: &Configuration) -> StencilResult<TransformReport> {
        let Scan {
            plan,
            visited,
            preview,
        } = self.scan(root, config)?;
        let mut report = TransformReport {
            applied: Vec::new(),
            warnings: preview.warnings,
        };

        for path in plan.deletions().into_iter().filter(|p| visited.contains(*p)) {
            self.delete(root, path, &mut report)
                .map_err(|e| abort(&report.applied, e))?;
        }

        for (path, name, executable) in plan
            .renders()
            .into_iter()
            .filter(|(p, ..)| visited.contains(*p))
        {
            self.render(root, path, name, executable, config, &mut report)
                .map_err(|e| abort(&report.applied, e))?;
        }

        let mut moved: Vec<(RelativePath, RelativePath)> = Vec::new();
        for (path, name) in plan
            .renames()
            .into_iter()
            .filter(|(p, _)| visited.contains(*p))
        {
            self.rename(root, path, name, &mut moved, &mut report)
                .map_err(|e| abort(&report.applied, e))?;
        }

        for path in plan.executables().into_iter().filter(|p| visited.contains(*p)) {
            self.make_executable(root, &follow(&moved, path), &mut report)
                .map_err(|e| abort(&report.applied, e))?;
        }

        for warning in &report.warnings {
            warn!(%warning, "transform warning");
        }
        info!(
            deleted = report.deleted(),
            rendered = report.rendered(),
            renamed = report.renamed(),
            warnings = report.warnings.len(),
            "Transform completed"
        );
        Ok(report)
    }

    /// Walk `root` and decide every visited path. Nothing is modified.
    pub fn preview(&self, root: &Path, config: &Configuration) -> StencilResult<TransformPreview> {
        Ok(self.scan(root, config)?.preview)
    }

    fn scan(&self, root: &Path, config: &Configuration) -> StencilResult<Scan> {
        if !self.fs.is_dir(root) {
            return Err(TransformError::RootMissing {
                path: root.to_path_buf(),
            }
            .into());
        }

        let plan = ActionPlan::compile(self.rules, config)?;
        let mut preview = TransformPreview::default();
        let mut visited = HashSet::new();

        for entry in self.fs.walk(root)? {
            let path = RelativePath::try_new(&entry.path).map_err(|e| StencilError::Internal {
                message: format!("walk returned {}: {e}", entry.path.display()),
            })?;
            let action = plan.decide(path.as_path());
            debug!(path = %path, %action, "decided");
            if action != FileAction::Keep {
                visited.insert(path.clone());
                preview.decisions.push((path, action));
            }
        }

        preview.warnings = plan
            .iter()
            .filter(|(p, _)| !visited.contains(*p))
            .map(|(p, a)| TransformWarning::unvisited(p, a))
            .collect();
        Ok(Scan {
            plan,
            visited,
            preview,
        })
    }

    fn delete(
        &self,
        root: &Path,
        path: &RelativePath,
        report: &mut TransformReport,
    ) -> StencilResult<()> {
        let target = path.under(root);
        if !self.fs.exists(&target) {
            report
                .warnings
                .push(TransformWarning::MissingDeleteTarget(path.clone()));
            return Ok(());
        }

        if self.fs.is_dir(&target) {
            self.fs.remove_dir_all(&target)?;
        } else {
            self.fs.remove_file(&target)?;
        }
        info!(path = %path, "deleted");
        report.applied.push(AppliedAction::Deleted(path.clone()));

        let mut parent = path.parent();
        while let Some(dir) = parent {
            if !self.fs.remove_empty_dir(&dir.under(root))? {
                break;
            }
            info!(path = %dir, "pruned empty directory");
            parent = dir.parent();
            report.applied.push(AppliedAction::Pruned(dir));
        }
        Ok(())
    }

    fn render(
        &self,
        root: &Path,
        path: &RelativePath,
        name: &FileName,
        executable: bool,
        config: &Configuration,
        report: &mut TransformReport,
    ) -> StencilResult<()> {
        let source = path.under(root);
        if !self.fs.exists(&source) {
            report
                .warnings
                .push(TransformWarning::MissingRenderSource(path.clone()));
            return Ok(());
        }

        let rendered_path = path.with_file_name(name);
        let destination = rendered_path.under(root);
        if self.fs.exists(&destination) {
            return Err(TransformError::RenderTargetExists {
                from: path.as_path().to_path_buf(),
                to: rendered_path.into_path_buf(),
            }
            .into());
        }

        let failed = |reason: String| TransformError::RenderFailed {
            path: path.to_string(),
            reason,
        };
        let text = String::from_utf8(self.fs.read_file(&source)?)
            .map_err(|_| failed("not valid UTF-8".into()))?;
        let output =
            jinja::render(&path.to_string(), &text, config).map_err(|e| failed(e.to_string()))?;

        self.fs.write_file(&destination, output.as_bytes())?;
        if executable {
            self.fs.set_executable(&destination)?;
        }
        self.fs.remove_file(&source)?;
        info!(from = %path, to = %rendered_path, "rendered");
        report.applied.push(AppliedAction::Rendered {
            from: path.clone(),
            to: rendered_path.clone(),
        });
        if executable {
            report
                .applied
                .push(AppliedAction::MadeExecutable(rendered_path));
        }
        Ok(())
    }

    fn rename(
        &self,
        root: &Path,
        path: &RelativePath,
        name: &FileName,
        moved: &mut Vec<(RelativePath, RelativePath)>,
        report: &mut TransformReport,
    ) -> StencilResult<()> {
        let current = follow(moved, path);
        let renamed = current.with_file_name(name);

        let source = current.under(root);
        if !self.fs.exists(&source) {
            report
                .warnings
                .push(TransformWarning::MissingRenameSource(current));
            return Ok(());
        }

        let destination = renamed.under(root);
        if self.fs.exists(&destination) {
            return Err(TransformError::RenameTargetExists {
                from: current.into_path_buf(),
                to: renamed.into_path_buf(),
            }
            .into());
        }

        self.fs.rename(&source, &destination)?;
        info!(from = %current, to = %renamed, "renamed");
        report.applied.push(AppliedAction::Renamed {
            from: current,
            to: renamed.clone(),
        });
        moved.push((path.clone(), renamed));
        Ok(())
    }

    fn make_executable(
        &self,
        root: &Path,
        path: &RelativePath,
        report: &mut TransformReport,
    ) -> StencilResult<()> {
        let target = path.under(root);
        if !self.fs.exists(&target) {
            report
                .warnings
                .push(TransformWarning::MissingChmodTarget(path.clone()));
            return Ok(());
        }
        if self.fs.set_executable(&target)? {
            info!(path = %path, "made executable");
            report
                .applied
                .push(AppliedAction::MadeExecutable(path.clone()));
        }
        Ok(())
    }
}

/// Where `path` is now, given the renames applied so far. The deepest
/// renamed ancestor wins.
fn follow(moved: &[(RelativePath, RelativePath)], path: &RelativePath) -> RelativePath {
    moved
        .iter()
        .filter(|(from, _)| from != path && path.starts_with(from))
        .max_by_key(|(from, _)| from.depth())
        .and_then(|(from, to)| path.rebase(from, to))
        .unwrap_or_else(|| path.clone())
}

/// Wrap a mid-run failure with the list of completed actions.
fn abort(completed: &[AppliedAction], err: StencilError) -> StencilError {
    if completed.is_empty() {
        return err;
    }
    let completed: Vec<String> = completed.iter().map(ToString::to_string).collect();
    error!(error = %err, "transform aborted, tree left partially transformed");
    for action in &completed {
        error!("  completed: {action}");
    }
    TransformError::Aborted {
        completed,
        source: Box::new(err),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{
        application::{ApplicationError, ports::MockFilesystem, ports::WalkEntry},
        domain::{RawAnswers, TemplateSchema, ValidationMode, VariableDecl},
    };

    fn config() -> Configuration {
        TemplateSchema::new([VariableDecl::string("namespace").default_value("acme")])
            .unwrap()
            .validate(&RawAnswers::new(), ValidationMode::Lenient)
            .unwrap()
    }

    fn root() -> PathBuf {
        PathBuf::from("/out")
    }

    fn at(path: &Path, expected: &str) -> bool {
        path == Path::new(expected)
    }

    #[test]
    fn missing_root_is_an_error() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| false);

        let err = Transformer::new(&fs, &[])
            .transform(&root(), &config())
            .unwrap_err();
        assert!(matches!(
            err,
            StencilError::Transform(TransformError::RootMissing { .. })
        ));
    }

    #[test]
    fn unvisited_targets_become_warnings() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| at(p, "/out"));
        fs.expect_walk().returning(|_| Ok(vec![WalkEntry::file("README.md")]));

        let rules = [
            ActionRule::remove("LICENSES/GPL-3.0-only.txt"),
            ActionRule::rename("src/__namespace__", "{{ namespace }}"),
        ];
        let report = Transformer::new(&fs, &rules)
            .transform(&root(), &config())
            .unwrap();
        assert!(report.applied.is_empty());
        assert_eq!(report.warnings.len(), 2);
        assert!(matches!(
            report.warnings[0],
            TransformWarning::MissingDeleteTarget(_)
        ));
    }

    #[test]
    fn existing_rename_target_is_a_hard_failure() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_walk().returning(|_| {
            Ok(vec![
                WalkEntry::dir("src"),
                WalkEntry::dir("src/__namespace__"),
                WalkEntry::dir("src/acme"),
            ])
        });
        fs.expect_exists().returning(|_| true);
        fs.expect_rename().never();

        let rules = [ActionRule::rename("src/__namespace__", "{{ namespace }}")];
        let err = Transformer::new(&fs, &rules)
            .transform(&root(), &config())
            .unwrap_err();
        match err {
            StencilError::Transform(TransformError::RenameTargetExists { from, to }) => {
                assert_eq!(from, PathBuf::from("src/__namespace__"));
                assert_eq!(to, PathBuf::from("src/acme"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failure_after_progress_lists_completed_actions() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| at(p, "/out"));
        fs.expect_walk()
            .returning(|_| Ok(vec![WalkEntry::file("a.txt"), WalkEntry::file("b.txt")]));
        fs.expect_exists().returning(|_| true);
        fs.expect_remove_file().returning(|p| {
            if at(p, "/out/b.txt") {
                Ok(())
            } else {
                Err(ApplicationError::FilesystemError {
                    path: p.to_path_buf(),
                    reason: "permission denied".into(),
                }
                .into())
            }
        });

        let rules = [ActionRule::remove("a.txt"), ActionRule::remove("b.txt")];
        let err = Transformer::new(&fs, &rules)
            .transform(&root(), &config())
            .unwrap_err();
        match err {
            StencilError::Transform(ref t @ TransformError::Aborted { .. }) => {
                assert_eq!(t.completed(), ["deleted b.txt"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn deletion_prunes_emptied_parents_but_not_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir()
            .returning(|p| at(p, "/out") || at(p, "/out/docs"));
        fs.expect_walk().returning(|_| {
            Ok(vec![
                WalkEntry::dir("docs"),
                WalkEntry::dir("docs/api"),
                WalkEntry::file("docs/api/index.md"),
            ])
        });
        fs.expect_exists().returning(|_| true);
        fs.expect_remove_file().times(1).returning(|_| Ok(()));
        fs.expect_remove_empty_dir()
            .withf(|p| at(p, "/out/docs/api") || at(p, "/out/docs"))
            .times(2)
            .returning(|_| Ok(true));

        let rules = [ActionRule::remove("docs/api/index.md")];
        let report = Transformer::new(&fs, &rules)
            .transform(&root(), &config())
            .unwrap();
        let applied: Vec<_> = report.applied.iter().map(ToString::to_string).collect();
        assert_eq!(
            applied,
            [
                "deleted docs/api/index.md",
                "pruned empty directory docs/api",
                "pruned empty directory docs",
            ]
        );
    }

    #[test]
    fn nested_renames_follow_renamed_parent() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| at(p, "/out"));
        fs.expect_walk().returning(|_| {
            Ok(vec![
                WalkEntry::dir("pkg"),
                WalkEntry::file("pkg/main.py"),
            ])
        });
        fs.expect_exists()
            .returning(|p| at(p, "/out/pkg") || at(p, "/out/acme/main.py"));
        let mut seq = mockall::Sequence::new();
        fs.expect_rename()
            .withf(|from, to| at(from, "/out/pkg") && at(to, "/out/acme"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_rename()
            .withf(|from, to| at(from, "/out/acme/main.py") && at(to, "/out/acme/cli.py"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let rules = [
            ActionRule::rename("pkg/main.py", "cli.py"),
            ActionRule::rename("pkg", "{{ namespace }}"),
        ];
        let report = Transformer::new(&fs, &rules)
            .transform(&root(), &config())
            .unwrap();
        assert_eq!(report.renamed(), 2);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn render_writes_the_sibling_and_drops_the_source() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| at(p, "/out"));
        fs.expect_walk()
            .returning(|_| Ok(vec![WalkEntry::file("setup.py.j2")]));
        fs.expect_exists().returning(|p| at(p, "/out/setup.py.j2"));
        fs.expect_read_file()
            .returning(|_| Ok(b"name={{ namespace }}\n".to_vec()));
        fs.expect_write_file()
            .withf(|p, c| at(p, "/out/setup.py") && String::from_utf8_lossy(c) == "name=acme\n")
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_set_executable()
            .withf(|p| at(p, "/out/setup.py"))
            .times(1)
            .returning(|_| Ok(true));
        fs.expect_remove_file()
            .withf(|p| at(p, "/out/setup.py.j2"))
            .times(1)
            .returning(|_| Ok(()));

        let rules = [ActionRule::render("setup.py.j2").executable()];
        let report = Transformer::new(&fs, &rules)
            .transform(&root(), &config())
            .unwrap();
        let applied: Vec<_> = report.applied.iter().map(ToString::to_string).collect();
        assert_eq!(
            applied,
            ["rendered setup.py.j2 -> setup.py", "made setup.py executable"]
        );
    }

    #[test]
    fn existing_render_target_is_a_hard_failure() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| at(p, "/out"));
        fs.expect_walk()
            .returning(|_| Ok(vec![WalkEntry::file("tox.ini"), WalkEntry::file("tox.ini.j2")]));
        fs.expect_exists().returning(|_| true);
        fs.expect_write_file().never();

        let rules = [ActionRule::render("tox.ini.j2")];
        let err = Transformer::new(&fs, &rules)
            .transform(&root(), &config())
            .unwrap_err();
        assert!(matches!(
            err,
            StencilError::Transform(TransformError::RenderTargetExists { .. })
        ));
    }

    #[test]
    fn undefined_variable_in_deferred_file_fails_the_render() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| at(p, "/out"));
        fs.expect_walk()
            .returning(|_| Ok(vec![WalkEntry::file("tox.ini.j2")]));
        fs.expect_exists().returning(|p| at(p, "/out/tox.ini.j2"));
        fs.expect_read_file()
            .returning(|_| Ok(b"envlist = py{{ supported_pythons }}\n".to_vec()));
        fs.expect_write_file().never();
        fs.expect_remove_file().never();

        let rules = [ActionRule::render("tox.ini.j2")];
        let err = Transformer::new(&fs, &rules)
            .transform(&root(), &config())
            .unwrap_err();
        match err {
            StencilError::Transform(TransformError::RenderFailed { path, .. }) => {
                assert_eq!(path, "tox.ini.j2");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn renders_run_before_renames_and_chmod_follows_the_parent() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| at(p, "/out"));
        fs.expect_walk().returning(|_| {
            Ok(vec![
                WalkEntry::dir("pkg"),
                WalkEntry::file("pkg/main.py.j2"),
                WalkEntry::file("pkg/run.sh"),
            ])
        });
        fs.expect_exists().returning(|p| {
            at(p, "/out/pkg") || at(p, "/out/pkg/main.py.j2") || at(p, "/out/acme/run.sh")
        });
        fs.expect_read_file()
            .returning(|_| Ok(b"# {{ cookiecutter.namespace }}\n".to_vec()));
        let mut seq = mockall::Sequence::new();
        fs.expect_write_file()
            .withf(|p, _| at(p, "/out/pkg/main.py"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_remove_file()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_rename()
            .withf(|from, to| at(from, "/out/pkg") && at(to, "/out/acme"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_set_executable()
            .withf(|p| at(p, "/out/acme/run.sh"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));

        let rules = [
            ActionRule::chmod("pkg/run.sh"),
            ActionRule::rename("pkg", "{{ namespace }}"),
            ActionRule::render("pkg/main.py.j2"),
        ];
        let report = Transformer::new(&fs, &rules)
            .transform(&root(), &config())
            .unwrap();
        assert_eq!(report.rendered(), 1);
        assert_eq!(report.renamed(), 1);
        assert_eq!(
            report.applied.last(),
            Some(&AppliedAction::MadeExecutable(
                RelativePath::try_new("acme/run.sh").unwrap()
            ))
        );
    }

    #[test]
    fn already_executable_file_is_not_reported() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| at(p, "/out"));
        fs.expect_walk()
            .returning(|_| Ok(vec![WalkEntry::file("setup.py")]));
        fs.expect_exists().returning(|_| true);
        fs.expect_set_executable().times(1).returning(|_| Ok(false));

        let rules = [ActionRule::chmod("setup.py")];
        let report = Transformer::new(&fs, &rules)
            .transform(&root(), &config())
            .unwrap();
        assert!(report.applied.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn preview_touches_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_walk()
            .returning(|_| Ok(vec![WalkEntry::dir("src"), WalkEntry::dir("src/__namespace__")]));
        fs.expect_remove_dir_all().never();
        fs.expect_rename().never();

        let rules = [ActionRule::rename("src/__namespace__", "{{ namespace }}")];
        let preview = Transformer::new(&fs, &rules)
            .preview(&root(), &config())
            .unwrap();
        assert_eq!(preview.decisions.len(), 1);
        assert_eq!(preview.decisions[0].1.to_string(), "rename to acme");
    }
}
