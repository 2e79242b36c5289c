//! Post-generation file actions: declarative rules and the pure decide phase.
//!
//! An [`ActionRule`] is written against template paths (`src/{{ namespace }}`)
//! and guarded by a [`Condition`]. [`ActionPlan::compile`] evaluates every rule
//! against a [`Configuration`] and produces concrete, root-relative decisions.
//! Nothing here touches the filesystem.
//!
//! Four kinds of rule exist: remove a path, rename it in place, render a
//! deferred `.j2` file into its sibling, and set the executable bit.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::path::Path;

use crate::domain::{
    error::TransformError,
    interpolate::{PlaceholderError, UndefinedVariable, placeholders},
    jinja,
    paths::{FileName, RelativePath},
    rules::parse_bool,
    value::Configuration,
};

// ── FileAction ───────────────────────────────────────────────────────────────

/// What happens to one path of the rendered tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileAction {
    #[default]
    Keep,
    Delete,
    RenameTo(FileName),
    /// Render with Jinja into the sibling `to`, then drop the source.
    Render { to: FileName, executable: bool },
    MakeExecutable,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => f.write_str("keep"),
            Self::Delete => f.write_str("delete"),
            Self::RenameTo(name) => write!(f, "rename to {name}"),
            Self::Render {
                to,
                executable: false,
            } => write!(f, "render to {to}"),
            Self::Render {
                to,
                executable: true,
            } => write!(f, "render to {to} (executable)"),
            Self::MakeExecutable => f.write_str("make executable"),
        }
    }
}

// ── Condition ────────────────────────────────────────────────────────────────

/// Guard deciding whether a rule applies for a configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Condition {
    #[default]
    Always,
    Equals { var: String, value: String },
    NotEquals { var: String, value: String },
    IsTrue(String),
    IsFalse(String),
}

impl Condition {
    pub fn equals(var: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals {
            var: var.into(),
            value: value.into(),
        }
    }

    pub fn not_equals(var: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NotEquals {
            var: var.into(),
            value: value.into(),
        }
    }

    pub fn variable(&self) -> Option<&str> {
        match self {
            Self::Always => None,
            Self::Equals { var, .. }
            | Self::NotEquals { var, .. }
            | Self::IsTrue(var)
            | Self::IsFalse(var) => Some(var),
        }
    }

    /// Evaluate against `config`; an undeclared variable is an error.
    pub fn holds(&self, config: &Configuration) -> Result<bool, UndefinedVariable> {
        let Some(var) = self.variable() else {
            return Ok(true);
        };
        let text = config
            .text(var)
            .ok_or_else(|| UndefinedVariable(var.to_owned()))?;
        let truthy = || {
            config
                .get(var)
                .and_then(|v| v.as_bool())
                .or_else(|| parse_bool(text))
                .unwrap_or(false)
        };
        Ok(match self {
            Self::Always => true,
            Self::Equals { value, .. } => text == value,
            Self::NotEquals { value, .. } => text != value,
            Self::IsTrue(_) => truthy(),
            Self::IsFalse(_) => !truthy(),
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("always"),
            Self::Equals { var, value } => write!(f, "{var} == {value}"),
            Self::NotEquals { var, value } => write!(f, "{var} != {value}"),
            Self::IsTrue(var) => write!(f, "{var}"),
            Self::IsFalse(var) => write!(f, "!{var}"),
        }
    }
}

// ── ActionRule ───────────────────────────────────────────────────────────────

/// A declarative post-generation rule. Paths may contain placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRule {
    Remove {
        path: String,
        when: Condition,
    },
    Rename {
        path: String,
        to: String,
        when: Condition,
    },
    /// Without `to`, the target is the source name minus `.j2`.
    Render {
        path: String,
        to: Option<String>,
        executable: bool,
        when: Condition,
    },
    Chmod {
        path: String,
        when: Condition,
    },
}

impl ActionRule {
    pub fn remove(path: impl Into<String>) -> Self {
        Self::Remove {
            path: path.into(),
            when: Condition::Always,
        }
    }

    pub fn rename(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Rename {
            path: path.into(),
            to: to.into(),
            when: Condition::Always,
        }
    }

    pub fn render(path: impl Into<String>) -> Self {
        Self::Render {
            path: path.into(),
            to: None,
            executable: false,
            when: Condition::Always,
        }
    }

    pub fn render_to(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Render {
            path: path.into(),
            to: Some(to.into()),
            executable: false,
            when: Condition::Always,
        }
    }

    pub fn chmod(path: impl Into<String>) -> Self {
        Self::Chmod {
            path: path.into(),
            when: Condition::Always,
        }
    }

    /// Mark the output of a render rule executable. Other rules are unchanged.
    pub fn executable(mut self) -> Self {
        if let Self::Render { executable, .. } = &mut self {
            *executable = true;
        }
        self
    }

    pub fn when(mut self, condition: Condition) -> Self {
        match &mut self {
            Self::Remove { when, .. }
            | Self::Rename { when, .. }
            | Self::Render { when, .. }
            | Self::Chmod { when, .. } => *when = condition,
        }
        self
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Remove { path, .. }
            | Self::Rename { path, .. }
            | Self::Render { path, .. }
            | Self::Chmod { path, .. } => path,
        }
    }

    /// Name template of the rename or render target, if the rule has one.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Rename { to, .. } => Some(to),
            Self::Render { to, .. } => to.as_deref(),
            Self::Remove { .. } | Self::Chmod { .. } => None,
        }
    }

    pub fn condition(&self) -> &Condition {
        match self {
            Self::Remove { when, .. }
            | Self::Rename { when, .. }
            | Self::Render { when, .. }
            | Self::Chmod { when, .. } => when,
        }
    }

    /// Every variable the rule needs: placeholders and the guard variable.
    pub fn referenced_variables(&self) -> Vec<String> {
        let mut vars = placeholders(self.path());
        vars.extend(self.target().map(placeholders).unwrap_or_default());
        vars.extend(self.condition().variable().map(str::to_owned));
        vars
    }

    /// Resolve against `config`. `Ok(None)` when the guard does not hold or
    /// the rename would not change the name.
    fn resolve(
        &self,
        config: &Configuration,
    ) -> Result<Option<(RelativePath, FileAction)>, TransformError> {
        let undefined = |e: UndefinedVariable| TransformError::UndefinedVariable {
            variable: e.0,
            rule: self.to_string(),
        };
        let placeholder = |e: PlaceholderError| match e {
            PlaceholderError::Undefined(e) => undefined(e),
            PlaceholderError::Unsupported(expression) => TransformError::InvalidRule {
                rule: self.to_string(),
                reason: format!("unsupported expression {expression}"),
            },
        };
        if !self.condition().holds(config).map_err(undefined)? {
            return Ok(None);
        }

        let raw_path = config.interpolate(self.path()).map_err(placeholder)?;
        let path = RelativePath::try_new(&raw_path).map_err(|e| e.into_transform(&raw_path))?;
        let target = |raw: &str| -> Result<FileName, TransformError> {
            let raw_name = config.interpolate(raw).map_err(placeholder)?;
            FileName::try_new(raw_name.as_str()).map_err(|e| e.into_transform(&raw_name))
        };

        match self {
            Self::Remove { .. } => Ok(Some((path, FileAction::Delete))),
            Self::Chmod { .. } => Ok(Some((path, FileAction::MakeExecutable))),
            Self::Rename { to, .. } => {
                let name = target(to)?;
                if path.file_name() == name.as_str() {
                    return Ok(None);
                }
                Ok(Some((path, FileAction::RenameTo(name))))
            }
            Self::Render { to, executable, .. } => {
                let name = match to {
                    Some(to) => target(to)?,
                    None => {
                        let file_name = path.file_name();
                        let stem = jinja::strip_deferred(&file_name).ok_or_else(|| {
                            TransformError::InvalidRule {
                                rule: self.to_string(),
                                reason: "a render without a target needs a .j2 source".into(),
                            }
                        })?;
                        FileName::try_new(stem).map_err(|e| e.into_transform(stem))?
                    }
                };
                Ok(Some((
                    path,
                    FileAction::Render {
                        to: name,
                        executable: *executable,
                    },
                )))
            }
        }
    }
}

impl fmt::Display for ActionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remove { path, .. } => write!(f, "remove {path}")?,
            Self::Rename { path, to, .. } => write!(f, "rename {path} -> {to}")?,
            Self::Render {
                path,
                to,
                executable,
                ..
            } => {
                write!(f, "render {path}")?;
                if let Some(to) = to {
                    write!(f, " -> {to}")?;
                }
                if *executable {
                    f.write_str(" +x")?;
                }
            }
            Self::Chmod { path, .. } => write!(f, "chmod +x {path}")?,
        }
        match self.condition() {
            Condition::Always => Ok(()),
            cond => write!(f, " when {cond}"),
        }
    }
}

/// Combine two decisions for the same path.
///
/// Delete wins over everything. A chmod folds into a render of the same
/// path. Any other pair of different decisions is a conflict.
fn merge(
    path: &RelativePath,
    existing: &FileAction,
    incoming: FileAction,
) -> Result<FileAction, TransformError> {
    match (existing, incoming) {
        (FileAction::Delete, _) | (_, FileAction::Delete) => Ok(FileAction::Delete),
        (existing, incoming) if *existing == incoming => Ok(incoming),
        (FileAction::Render { to, .. }, FileAction::MakeExecutable) => Ok(FileAction::Render {
            to: to.clone(),
            executable: true,
        }),
        (FileAction::MakeExecutable, FileAction::Render { to, .. }) => {
            Ok(FileAction::Render {
                to,
                executable: true,
            })
        }
        (
            FileAction::Render {
                to: a,
                executable: x,
            },
            FileAction::Render {
                to: b,
                executable: y,
            },
        ) if *a == b => Ok(FileAction::Render {
            to: b,
            executable: *x || y,
        }),
        (existing, incoming) => {
            let (a, b) = (existing.to_string(), incoming.to_string());
            let (first, second) = if a <= b { (a, b) } else { (b, a) };
            Err(TransformError::ConflictingActions {
                path: path.to_string(),
                first,
                second,
            })
        }
    }
}

// ── ActionPlan ───────────────────────────────────────────────────────────────

/// Concrete decisions for one configuration, keyed by root-relative path.
///
/// The plan is independent of rule order: `Delete` wins over any other
/// decision for the same path, and entries below a deleted directory are
/// dropped. The accessors below hand out each kind of decision in the order
/// it must be applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionPlan {
    actions: BTreeMap<RelativePath, FileAction>,
}

impl ActionPlan {
    pub fn compile(rules: &[ActionRule], config: &Configuration) -> Result<Self, TransformError> {
        let mut actions: BTreeMap<RelativePath, FileAction> = BTreeMap::new();

        for rule in rules {
            let Some((path, action)) = rule.resolve(config)? else {
                continue;
            };
            match actions.entry(path) {
                Entry::Vacant(slot) => {
                    slot.insert(action);
                }
                Entry::Occupied(mut slot) => {
                    let merged = merge(slot.key(), slot.get(), action)?;
                    slot.insert(merged);
                }
            }
        }

        let deleted: Vec<RelativePath> = actions
            .iter()
            .filter(|(_, a)| **a == FileAction::Delete)
            .map(|(p, _)| p.clone())
            .collect();
        actions.retain(|path, _| {
            !deleted
                .iter()
                .any(|d| d != path && path.starts_with(d))
        });

        Ok(Self { actions })
    }

    /// Decision for a single root-relative path.
    pub fn decide(&self, path: &Path) -> FileAction {
        self.actions.get(path).cloned().unwrap_or_default()
    }

    /// Paths to delete, deepest first.
    pub fn deletions(&self) -> Vec<&RelativePath> {
        let mut paths: Vec<_> = self
            .actions
            .iter()
            .filter(|(_, a)| **a == FileAction::Delete)
            .map(|(p, _)| p)
            .collect();
        paths.sort_by(|a, b| b.depth().cmp(&a.depth()).then_with(|| b.cmp(a)));
        paths
    }

    /// Renders in path order, as `(source, target name, executable)`.
    pub fn renders(&self) -> Vec<(&RelativePath, &FileName, bool)> {
        self.actions
            .iter()
            .filter_map(|(p, a)| match a {
                FileAction::Render { to, executable } => Some((p, to, *executable)),
                _ => None,
            })
            .collect()
    }

    /// Renames, shallowest first.
    pub fn renames(&self) -> Vec<(&RelativePath, &FileName)> {
        let mut renames: Vec<_> = self
            .actions
            .iter()
            .filter_map(|(p, a)| match a {
                FileAction::RenameTo(name) => Some((p, name)),
                _ => None,
            })
            .collect();
        renames.sort_by(|(a, _), (b, _)| a.depth().cmp(&b.depth()).then_with(|| a.cmp(b)));
        renames
    }

    /// Paths to mark executable, in path order.
    pub fn executables(&self) -> Vec<&RelativePath> {
        self.actions
            .iter()
            .filter(|(_, a)| **a == FileAction::MakeExecutable)
            .map(|(p, _)| p)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RelativePath, &FileAction)> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
