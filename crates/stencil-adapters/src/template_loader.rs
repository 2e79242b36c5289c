//! Filesystem-based template loader.
//!
//! Reads one template directory into a domain [`Template`]: every file and
//! directory becomes a node of the tree, and the optional `template.toml`
//! manifest supplies the variables and post-generation actions.
//!
//! # Directory layout expected
//!
//! ```text
//! pyproject/
//! ├── template.toml                     ← manifest (optional, not rendered)
//! ├── hooks/                            ← never rendered
//! ├── README.md
//! ├── setup.py.j2                       ← rendered with Jinja after the transform
//! └── src/
//!     ├── {{ package_name }}/
//!     │   └── __init__.py
//!     └── __namespace__/
//!         └── {{ package_name }}/
//!             └── __init__.py
//! ```
//!
//! Without a manifest the built-in Python project schema applies
//! ([`builtin_templates::pyproject_variables`]).
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! name    = "pyproject"
//! version = "1.0.0"                   # optional
//! description = "Python project"      # optional
//!
//! [[variables]]
//! name     = "package_name"
//! kind     = "string"                 # string | bool | choice | multiselect
//! required = true
//! pattern  = "identifier"             # identifier | word | <regex>
//! exempt   = [".remove.me"]
//! choices  = ["a", "b"]               # choice and multiselect only
//! email    = false
//! default  = "..."                    # multiselect: "a,b" or ["a", "b"]
//!
//! [[variables]]
//! name     = "least_python3"
//! computed = "python_versions|first"  # Jinja expression, never prompted
//!
//! [[actions]]
//! op   = "remove"                     # remove | rename | render | chmod
//! path = "src/{{ package_name }}"
//! to   = "{{ namespace }}"            # rename; optional for render
//! executable = false                  # render only
//! when = { var = "namespace", equals = ".remove.me" }
//! ```
//!
//! `when` takes exactly one of `equals`, `not_equals`, `is_true = true` or
//! `is_false = true`; without `when` the action always applies.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::{DirEntry, WalkDir};

use stencil_core::{
    application::ApplicationError,
    domain::{
        ActionRule, Condition, DirectorySpec, FileSpec, Pattern, Rule, Template, TemplateContent,
        TemplateError, TemplateMetadata, TemplateNode, TemplateTree, VariableDecl, VariableKind,
    },
    error::{StencilError, StencilResult},
};

use crate::builtin_templates;

/// Manifest file name inside a template directory.
pub const MANIFEST_FILE: &str = "template.toml";

/// Top-level directory of a template that is never rendered.
pub const HOOKS_DIR: &str = "hooks";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `template.toml` file.
///
/// All fields map 1-to-1 to TOML sections; see the module-level docs for the
/// full format.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateManifest {
    pub template: TemplateSection,
    /// Declared variables, in prompt order.
    #[serde(default)]
    pub variables: Vec<VariableEntry>,
    #[serde(default)]
    pub actions: Vec<ActionEntry>,
}

/// `[template]` section: identity of the template.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateSection {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// One `[[variables]]` entry.
#[derive(Debug, Deserialize, Clone)]
pub struct VariableEntry {
    pub name: String,
    pub kind: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub pattern: Option<String>,
    #[serde(default)]
    pub exempt: Vec<String>,
    pub choices: Option<Vec<String>>,
    #[serde(default)]
    pub email: bool,
    /// Strings, booleans and numbers are accepted, and arrays of them for
    /// multiselect variables.
    pub default: Option<toml::Value>,
    pub description: Option<String>,
    /// Jinja expression evaluated over the answers.
    pub computed: Option<String>,
}

/// One `[[actions]]` entry.
#[derive(Debug, Deserialize, Clone)]
pub struct ActionEntry {
    pub op: ActionOp,
    pub path: String,
    pub to: Option<String>,
    #[serde(default)]
    pub executable: bool,
    pub when: Option<WhenEntry>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionOp {
    Remove,
    Rename,
    Render,
    Chmod,
}

/// Inline `when = { ... }` table.
#[derive(Debug, Deserialize, Clone)]
pub struct WhenEntry {
    pub var: String,
    pub equals: Option<String>,
    pub not_equals: Option<String>,
    #[serde(default)]
    pub is_true: bool,
    #[serde(default)]
    pub is_false: bool,
}

// ── Manifest conversion ───────────────────────────────────────────────────────

impl VariableEntry {
    fn into_decl(self) -> Result<VariableDecl, TemplateError> {
        if let Some(expression) = self.computed.clone() {
            return self.into_computed(expression);
        }

        let kind = match &self.kind {
            Some(kind) => kind.parse()?,
            None if self.choices.is_some() => VariableKind::Choice,
            None => VariableKind::String,
        };

        let mut decl = match kind {
            VariableKind::String => VariableDecl::string(&self.name),
            VariableKind::Bool => VariableDecl::boolean(&self.name),
            VariableKind::Choice => {
                let choices = self.choices.clone().unwrap_or_default();
                if choices.is_empty() {
                    return Err(TemplateError::InvalidManifest(format!(
                        "choice variable '{}' needs a non-empty 'choices' list",
                        self.name
                    )));
                }
                VariableDecl::choice(&self.name, choices)
            }
            VariableKind::MultiSelect => {
                let choices = self.choices.clone().unwrap_or_default();
                if choices.is_empty() {
                    return Err(TemplateError::InvalidManifest(format!(
                        "multiselect variable '{}' needs a non-empty 'choices' list",
                        self.name
                    )));
                }
                VariableDecl::multiselect(&self.name, choices)
            }
        };

        if self.required {
            decl = decl.required();
        }
        if let Some(pattern) = &self.pattern {
            let pattern = pattern
                .parse::<Pattern>()
                .map_err(|e| TemplateError::InvalidPattern {
                    name: self.name.clone(),
                    reason: e.to_string(),
                })?;
            decl = decl.pattern(pattern);
        }
        if self.email {
            decl = decl.rule(Rule::Email);
        }
        for value in self.exempt {
            decl = decl.exempt(value);
        }
        if let Some(default) = &self.default {
            let text = match default {
                toml::Value::Array(items) if kind == VariableKind::MultiSelect => {
                    items.iter().map(scalar_to_string).collect::<Option<Vec<_>>>().map(|v| v.join(","))
                }
                other => scalar_to_string(other),
            };
            decl = decl.default_value(text.ok_or_else(|| {
                TemplateError::InvalidManifest(format!(
                    "default of '{}' must be a string, boolean or number",
                    self.name
                ))
            })?);
        }
        if let Some(text) = self.description {
            decl = decl.describe(text);
        }
        Ok(decl)
    }

    /// Computed variables take an expression and nothing else.
    fn into_computed(self, expression: String) -> Result<VariableDecl, TemplateError> {
        let answered = self.required
            || self.pattern.is_some()
            || self.choices.is_some()
            || self.default.is_some()
            || self.email
            || !self.exempt.is_empty();
        if answered || self.kind.is_some() {
            return Err(TemplateError::InvalidManifest(format!(
                "computed variable '{}' only takes 'computed' and 'description'",
                self.name
            )));
        }
        let decl = VariableDecl::computed(&self.name, expression);
        Ok(match self.description {
            Some(text) => decl.describe(text),
            None => decl,
        })
    }
}

impl ActionEntry {
    fn into_rule(self) -> Result<ActionRule, TemplateError> {
        if self.executable && self.op != ActionOp::Render {
            return Err(TemplateError::InvalidManifest(format!(
                "'executable' on '{}' is only valid for render actions",
                self.path
            )));
        }
        let rule = match (self.op, self.to) {
            (ActionOp::Remove, None) => ActionRule::remove(self.path),
            (ActionOp::Rename, Some(to)) => ActionRule::rename(self.path, to),
            (ActionOp::Chmod, None) => ActionRule::chmod(self.path),
            (ActionOp::Render, to) => {
                let rule = match to {
                    Some(to) => ActionRule::render_to(self.path, to),
                    None => ActionRule::render(self.path),
                };
                if self.executable { rule.executable() } else { rule }
            }
            (ActionOp::Remove | ActionOp::Chmod, Some(_)) => {
                return Err(TemplateError::InvalidManifest(format!(
                    "remove and chmod actions on '{}' must not have 'to'",
                    self.path
                )));
            }
            (ActionOp::Rename, None) => {
                return Err(TemplateError::InvalidManifest(format!(
                    "rename action on '{}' needs 'to'",
                    self.path
                )));
            }
        };
        match self.when {
            Some(when) => Ok(rule.when(when.into_condition()?)),
            None => Ok(rule),
        }
    }
}

impl WhenEntry {
    fn into_condition(self) -> Result<Condition, TemplateError> {
        match (self.equals, self.not_equals, self.is_true, self.is_false) {
            (Some(value), None, false, false) => Ok(Condition::equals(self.var, value)),
            (None, Some(value), false, false) => Ok(Condition::not_equals(self.var, value)),
            (None, None, true, false) => Ok(Condition::IsTrue(self.var)),
            (None, None, false, true) => Ok(Condition::IsFalse(self.var)),
            _ => Err(TemplateError::InvalidManifest(format!(
                "'when' on '{}' needs exactly one of equals, not_equals, is_true, is_false",
                self.var
            ))),
        }
    }
}

/// Strings, booleans and numbers as answer text.
pub(crate) fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads a [`Template`] from one directory on disk.
///
/// # Example
///
/// ```no_run
/// use stencil_adapters::FilesystemTemplateLoader;
///
/// let template = FilesystemTemplateLoader::new("./templates/pyproject").load()?;
/// println!("{} declares {} variables", template.name(), template.schema.len());
/// # Ok::<(), stencil_core::error::StencilError>(())
/// ```
pub struct FilesystemTemplateLoader {
    template_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    /// Create a loader pointed at `template_dir`.
    ///
    /// The directory does not need to exist yet; [`load`](Self::load) fails
    /// with `TemplateNotFound` if it is missing when called.
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
        }
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Load the template: manifest (or built-in schema) plus the file tree.
    ///
    /// The result has passed [`Template::validate`], so every placeholder in
    /// the tree names a declared variable.
    #[instrument(skip(self), fields(dir = %self.template_dir.display()))]
    pub fn load(&self) -> StencilResult<Template> {
        if !self.template_dir.is_dir() {
            return Err(ApplicationError::TemplateNotFound {
                path: self.template_dir.clone(),
            }
            .into());
        }

        let builder = match self.read_manifest()? {
            Some(manifest) => {
                let metadata = TemplateMetadata::new(manifest.template.name)
                    .version(manifest.template.version.unwrap_or_else(|| "0.1.0".into()))
                    .description(manifest.template.description.unwrap_or_default());
                let variables = manifest
                    .variables
                    .into_iter()
                    .map(VariableEntry::into_decl)
                    .collect::<Result<Vec<_>, _>>()?;
                let actions = manifest
                    .actions
                    .into_iter()
                    .map(ActionEntry::into_rule)
                    .collect::<Result<Vec<_>, _>>()?;
                Template::builder()
                    .metadata(metadata)
                    .variables(variables)
                    .actions(actions)
            }
            None => {
                debug!("no template.toml, using the built-in schema");
                Template::builder()
                    .metadata(TemplateMetadata::new(self.fallback_name()))
                    .variables(builtin_templates::pyproject_variables())
                    .actions(builtin_templates::pyproject_actions())
            }
        };

        let template = builder.tree(self.build_tree()?).build()?;
        template.validate()?;

        debug!(
            name = %template.name(),
            variables = template.schema.len(),
            actions = template.actions.len(),
            nodes = template.tree.len(),
            "loaded template"
        );
        Ok(template)
    }

    /// Parse `template.toml` if the directory has one.
    fn read_manifest(&self) -> StencilResult<Option<TemplateManifest>> {
        let manifest_path = self.template_dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&manifest_path)
            .map_err(|e| ApplicationError::io(&manifest_path, &e))?;
        let manifest = toml::from_str(&raw).map_err(|e| {
            TemplateError::InvalidManifest(format!(
                "failed to parse '{}': {e}",
                manifest_path.display()
            ))
        })?;
        Ok(Some(manifest))
    }

    /// Walk the template directory into a [`TemplateTree`].
    ///
    /// The walk is sorted so the tree (and therefore the render) is the same
    /// on every platform.
    fn build_tree(&self) -> StencilResult<TemplateTree> {
        let root = &self.template_dir;
        let mut tree = TemplateTree::new();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_loader_artefact(root, e));

        for walk_entry in walker {
            let walk_entry = walk_entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                StencilError::from(ApplicationError::FilesystemError {
                    path,
                    reason: format!("directory walk error: {e}"),
                })
            })?;
            let abs_path = walk_entry.path();
            let path_str = relative_str(root, abs_path)?;

            if walk_entry.file_type().is_dir() {
                tree.push(TemplateNode::Directory(DirectorySpec::new(path_str)));
                continue;
            }

            if !walk_entry.file_type().is_file() {
                warn!(path = %path_str, "skipping symlink or special file");
                continue;
            }

            let bytes = fs::read(abs_path).map_err(|e| ApplicationError::io(abs_path, &e))?;
            tree.push(TemplateNode::File(FileSpec::new(
                path_str,
                TemplateContent::from_bytes(bytes),
            )));
        }

        Ok(tree)
    }

    fn fallback_name(&self) -> String {
        self.template_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| builtin_templates::PYPROJECT.to_owned())
    }
}

/// `template.toml` and `hooks/` at the top level belong to the loader.
fn is_loader_artefact(root: &Path, entry: &DirEntry) -> bool {
    entry.depth() == 1
        && entry.path().parent() == Some(root)
        && (entry.file_name() == MANIFEST_FILE
            || (entry.file_name() == HOOKS_DIR && entry.file_type().is_dir()))
}

/// `/`-separated path of `path` below `root`.
fn relative_str(root: &Path, path: &Path) -> StencilResult<String> {
    let rel = path.strip_prefix(root).map_err(|_| {
        StencilError::from(ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: format!("not below template root {}", root.display()),
        })
    })?;
    Ok(rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stencil_core::domain::{FileAction, FileName, REMOVE_ME, ValidationMode};
    use tempfile::TempDir;

    const MINIMAL_MANIFEST: &str = r#"
[template]
name = "mini"

[[variables]]
name = "project_name"
required = true
pattern = "word"

[[variables]]
name = "with_docs"
kind = "bool"
default = false

[[actions]]
op = "remove"
path = "docs"
when = { var = "with_docs", is_false = true }
"#;

    /// Write a template directory under a TempDir.
    fn make_template_dir(manifest: Option<&str>, files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        if let Some(manifest) = manifest {
            fs::write(temp.path().join(MANIFEST_FILE), manifest).unwrap();
        }
        for (rel, content) in files {
            let path = temp.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        temp
    }

    fn node_paths(template: &Template) -> Vec<&str> {
        template.tree.nodes.iter().map(TemplateNode::path).collect()
    }

    #[test]
    fn missing_directory_is_template_not_found() {
        let temp = TempDir::new().unwrap();
        let err = FilesystemTemplateLoader::new(temp.path().join("nope"))
            .load()
            .unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn loads_variables_and_actions_from_manifest() {
        let dir = make_template_dir(
            Some(MINIMAL_MANIFEST),
            &[
                ("README.md", "# {{ project_name }}"),
                ("docs/index.md", "docs"),
            ],
        );
        let template = FilesystemTemplateLoader::new(dir.path()).load().unwrap();

        assert_eq!(template.name(), "mini");
        let names: Vec<_> = template.schema.variables().map(VariableDecl::name).collect();
        assert_eq!(names, ["project_name", "with_docs"]);

        let raw = [("project_name".to_owned(), "demo".to_owned())]
            .into_iter()
            .collect();
        let config = template
            .validate_answers(&raw, ValidationMode::Strict)
            .unwrap();
        let plan = template.plan(&config).unwrap();
        assert_eq!(plan.decide(Path::new("docs")), FileAction::Delete);
    }

    #[test]
    fn manifest_and_hooks_are_not_part_of_the_tree() {
        let dir = make_template_dir(
            Some(MINIMAL_MANIFEST),
            &[
                ("hooks/pre_gen_project.py", "raise SystemExit(1)"),
                ("README.md", "# {{ project_name }}"),
                ("src/hooks/keep.txt", "nested hooks dirs are content"),
            ],
        );
        let template = FilesystemTemplateLoader::new(dir.path()).load().unwrap();
        assert_eq!(
            node_paths(&template),
            ["README.md", "src", "src/hooks", "src/hooks/keep.txt"]
        );
    }

    #[test]
    fn without_manifest_the_builtin_schema_applies() {
        let dir = make_template_dir(None, &[("README.md", "# {{ cookiecutter.project_name }}")]);
        let template = FilesystemTemplateLoader::new(dir.path()).load().unwrap();

        assert!(template.schema.contains("package_name"));
        assert_eq!(
            template.schema.get("namespace").and_then(VariableDecl::default),
            Some(REMOVE_ME)
        );
        assert!(!template.actions.is_empty());
    }

    #[test]
    fn undeclared_placeholder_is_rejected_at_load() {
        let dir = make_template_dir(Some(MINIMAL_MANIFEST), &[("x.txt", "{{ author }}")]);
        let err = FilesystemTemplateLoader::new(dir.path()).load().unwrap_err();
        assert!(matches!(
            err,
            StencilError::Template(TemplateError::UndeclaredVariable { ref variable, .. })
                if variable == "author"
        ));
    }

    #[test]
    fn binary_files_are_kept_as_bytes() {
        let dir = make_template_dir(Some(MINIMAL_MANIFEST), &[]);
        fs::write(dir.path().join("logo.png"), [0x89, b'P', b'N', b'G', 0xff]).unwrap();

        let template = FilesystemTemplateLoader::new(dir.path()).load().unwrap();
        let TemplateNode::File(spec) = &template.tree.nodes[0] else {
            panic!("expected a file node");
        };
        assert!(matches!(spec.content, TemplateContent::Binary(_)));
    }

    #[test]
    fn bad_pattern_is_reported_with_the_variable() {
        let manifest = r#"
[template]
name = "bad"

[[variables]]
name = "slug"
pattern = "([a-z"
"#;
        let dir = make_template_dir(Some(manifest), &[("a.txt", "")]);
        let err = FilesystemTemplateLoader::new(dir.path()).load().unwrap_err();
        assert!(matches!(
            err,
            StencilError::Template(TemplateError::InvalidPattern { ref name, .. }) if name == "slug"
        ));
    }

    #[test]
    fn when_needs_exactly_one_test() {
        let manifest = r#"
[template]
name = "bad"

[[variables]]
name = "x"

[[actions]]
op = "remove"
path = "a.txt"
when = { var = "x", equals = "1", not_equals = "2" }
"#;
        let dir = make_template_dir(Some(manifest), &[("a.txt", "")]);
        assert!(matches!(
            FilesystemTemplateLoader::new(dir.path()).load(),
            Err(StencilError::Template(TemplateError::InvalidManifest(_)))
        ));
    }

    #[test]
    fn rename_without_target_is_invalid() {
        let entry = ActionEntry {
            op: ActionOp::Rename,
            path: "a".into(),
            to: None,
            executable: false,
            when: None,
        };
        assert!(entry.into_rule().is_err());
    }

    #[test]
    fn executable_is_only_valid_on_render() {
        let entry = ActionEntry {
            op: ActionOp::Remove,
            path: "setup.py".into(),
            to: None,
            executable: true,
            when: None,
        };
        assert!(entry.into_rule().is_err());
    }

    #[test]
    fn render_and_chmod_actions_load() {
        let manifest = r#"
[template]
name = "py"

[[variables]]
name = "package_name"
required = true
pattern = "identifier"

[[variables]]
name = "python_versions"
kind = "multiselect"
choices = ["3.8", "3.9", "3.10"]
default = ["3.9", "3.10"]

[[variables]]
name = "least_python3"
computed = "python_versions|first"

[[actions]]
op = "render"
path = "setup.py.j2"
executable = true

[[actions]]
op = "chmod"
path = "run.sh"
"#;
        let dir = make_template_dir(
            Some(manifest),
            &[
                ("setup.py.j2", "python_requires='>={{ least_python3 }}'\n"),
                ("run.sh", "#!/bin/sh\n"),
            ],
        );
        let template = FilesystemTemplateLoader::new(dir.path()).load().unwrap();

        let decl = template.schema.get("python_versions").unwrap();
        assert_eq!(decl.kind(), VariableKind::MultiSelect);
        assert_eq!(decl.default(), Some("3.9,3.10"));
        assert!(template.schema.get("least_python3").unwrap().is_computed());

        let raw = [("package_name".to_owned(), "tools".to_owned())]
            .into_iter()
            .collect();
        let config = template
            .validate_answers(&raw, ValidationMode::Strict)
            .unwrap();
        assert_eq!(
            config.get("least_python3").map(|v| v.as_text()),
            Some("3.9")
        );

        let plan = template.plan(&config).unwrap();
        assert_eq!(
            plan.decide(Path::new("setup.py.j2")),
            FileAction::Render {
                to: FileName::try_new("setup.py").unwrap(),
                executable: true,
            }
        );
        assert_eq!(plan.decide(Path::new("run.sh")), FileAction::MakeExecutable);
    }

    #[test]
    fn computed_variable_rejects_answer_settings() {
        let entry: VariableEntry = toml::from_str(
            r#"
name = "least_python3"
computed = "python_versions|first"
default = "3.8"
"#,
        )
        .unwrap();
        assert!(matches!(
            entry.into_decl(),
            Err(TemplateError::InvalidManifest(_))
        ));
    }

    #[test]
    fn filter_in_plain_file_is_rejected_at_load() {
        let dir = make_template_dir(
            Some(MINIMAL_MANIFEST),
            &[("README.md", "# {{ project_name|title }}")],
        );
        assert!(matches!(
            FilesystemTemplateLoader::new(dir.path()).load(),
            Err(StencilError::Template(TemplateError::UnsupportedExpression { .. }))
        ));
    }

    #[test]
    fn choice_kind_is_inferred_from_choices() {
        let entry: VariableEntry = toml::from_str(
            r#"
name = "license"
choices = ["MIT", "Apache-2.0"]
default = "MIT"
"#,
        )
        .unwrap();
        let decl = entry.into_decl().unwrap();
        assert_eq!(decl.kind(), VariableKind::Choice);
        assert_eq!(decl.choices(), Some(&["MIT".to_owned(), "Apache-2.0".to_owned()][..]));
        assert_eq!(decl.default(), Some("MIT"));
    }
}
