use std::collections::HashSet;

use crate::domain::{
    actions::{ActionPlan, ActionRule},
    error::{TemplateError, TransformError, ValidationError},
    interpolate::{first_unsupported, placeholders},
    jinja,
    rules::VariableDecl,
    validation::{TemplateSchema, ValidationMode},
    value::{Configuration, RawAnswers},
};

// ============================================================================
// Template - The Aggregate Root
// ============================================================================

/// A parameterised project skeleton plus the hooks that go with it.
///
/// ## Lifecycle
///
/// 1. **Definition:** built with [`TemplateBuilder`] or loaded from a
///    template directory (`template.toml` + files)
/// 2. **Validation:** [`Template::validate`] checks that every placeholder
///    names a declared variable
/// 3. **Pre-generation:** [`Template::validate_answers`] turns raw answers
///    into a [`Configuration`]
/// 4. **Rendering:** a `TemplateRenderer` produces a `ProjectStructure`
/// 5. **Post-generation:** [`Template::plan`] compiles the action rules
#[derive(Debug, Clone)]
pub struct Template {
    /// Human-readable metadata for CLI display
    pub metadata: TemplateMetadata,

    /// Declared variables in declaration order
    pub schema: TemplateSchema,

    /// Post-generation rules
    pub actions: Vec<ActionRule>,

    /// Files and directories to render
    pub tree: TemplateTree,
}

impl Template {
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::default()
    }

    /// Check template-level invariants.
    ///
    /// - no raw path appears twice in the tree
    /// - paths, plain text files and action rules use bare `{{ name }}`
    ///   placeholders only, each naming a declared variable
    /// - deferred `.j2` files parse as Jinja and read only declared variables
    /// - computed expressions parse
    /// - a render rule without a target points at a `.j2` path
    pub fn validate(&self) -> Result<(), TemplateError> {
        for decl in self.schema.variables() {
            if let Some(expression) = decl.expression() {
                jinja::check_expression(expression).map_err(|e| TemplateError::InvalidJinja {
                    path: format!("computed variable '{}'", decl.name()),
                    reason: e.to_string(),
                })?;
            }
        }

        let mut seen = HashSet::new();
        for node in &self.tree.nodes {
            if !seen.insert(node.path()) {
                return Err(TemplateError::DuplicatePath {
                    path: node.path().to_owned(),
                });
            }

            check_plain(node.path(), node.path())?;
            let mut names = placeholders(node.path());
            if let TemplateNode::File(FileSpec {
                content: TemplateContent::Text(text),
                ..
            }) = node
            {
                if jinja::is_deferred(node.path()) {
                    let vars = jinja::referenced_variables(node.path(), text.as_str())
                        .map_err(|e| TemplateError::InvalidJinja {
                            path: node.path().to_owned(),
                            reason: e.to_string(),
                        })?;
                    names.extend(vars);
                } else {
                    check_plain(node.path(), text.as_str())?;
                    names.extend(placeholders(text.as_str()));
                }
            }
            self.check_declared(node.path(), names)?;
        }

        for rule in &self.actions {
            check_plain(rule.path(), rule.path())?;
            if let Some(target) = rule.target() {
                check_plain(rule.path(), target)?;
            }
            if matches!(rule, ActionRule::Render { to: None, .. }) && !jinja::is_deferred(rule.path())
            {
                return Err(TemplateError::InvalidManifest(format!(
                    "'{rule}' needs a .j2 source or a target name"
                )));
            }
            self.check_declared(rule.path(), rule.referenced_variables())?;
        }
        Ok(())
    }

    fn check_declared(
        &self,
        path: &str,
        names: impl IntoIterator<Item = String>,
    ) -> Result<(), TemplateError> {
        match names.into_iter().find(|n| !self.schema.contains(n)) {
            Some(variable) => Err(TemplateError::UndeclaredVariable {
                path: path.to_owned(),
                variable,
            }),
            None => Ok(()),
        }
    }

    /// Pre-generation validation of raw answers against this template.
    pub fn validate_answers(
        &self,
        answers: &RawAnswers,
        mode: ValidationMode,
    ) -> Result<Configuration, ValidationError> {
        self.schema.validate(answers, mode)
    }

    /// Decide phase of the post-generation transform.
    pub fn plan(&self, config: &Configuration) -> Result<ActionPlan, TransformError> {
        ActionPlan::compile(&self.actions, config)
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// Builder for [`Template`].
///
/// Variables are checked for duplicates at `build()`.
#[derive(Debug, Default)]
pub struct TemplateBuilder {
    metadata: Option<TemplateMetadata>,
    variables: Vec<VariableDecl>,
    actions: Vec<ActionRule>,
    tree: TemplateTree,
}

impl TemplateBuilder {
    pub fn metadata(mut self, metadata: TemplateMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn variable(mut self, decl: VariableDecl) -> Self {
        self.variables.push(decl);
        self
    }

    pub fn variables(mut self, decls: impl IntoIterator<Item = VariableDecl>) -> Self {
        self.variables.extend(decls);
        self
    }

    pub fn action(mut self, rule: ActionRule) -> Self {
        self.actions.push(rule);
        self
    }

    pub fn actions(mut self, rules: impl IntoIterator<Item = ActionRule>) -> Self {
        self.actions.extend(rules);
        self
    }

    /// Set the entire tree at once (replaces any previous nodes).
    pub fn tree(mut self, tree: TemplateTree) -> Self {
        self.tree = tree;
        self
    }

    pub fn add_node(mut self, node: TemplateNode) -> Self {
        self.tree.push(node);
        self
    }

    pub fn build(self) -> Result<Template, TemplateError> {
        let metadata = self
            .metadata
            .ok_or_else(|| TemplateError::InvalidManifest("missing [template] table".into()))?;
        if metadata.name.trim().is_empty() {
            return Err(TemplateError::InvalidManifest(
                "template name cannot be empty".into(),
            ));
        }
        Ok(Template {
            metadata,
            schema: TemplateSchema::new(self.variables)?,
            actions: self.actions,
            tree: self.tree,
        })
    }
}

fn check_plain(path: &str, text: &str) -> Result<(), TemplateError> {
    match first_unsupported(text) {
        Some(expression) => Err(TemplateError::UnsupportedExpression {
            path: path.to_owned(),
            expression,
        }),
        None => Ok(()),
    }
}

// ============================================================================
// Metadata
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMetadata {
    /// Short display name (e.g., "pyproject")
    pub name: String,
    pub version: String,
    pub description: String,
}

impl TemplateMetadata {
    /// New metadata with version `0.1.0` and no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: "0.1.0".to_string(),
            description: String::new(),
        }
    }

    pub fn version(mut self, ver: impl Into<String>) -> Self {
        self.version = ver.into();
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }
}

// ============================================================================
// Template Tree
// ============================================================================

/// Files and directories of a template, in walk order.
///
/// Paths are raw template paths: segments may still contain placeholders
/// (`src/{{ package_name }}/__init__.py`).
#[derive(Debug, Clone, Default)]
pub struct TemplateTree {
    pub nodes: Vec<TemplateNode>,
}

impl TemplateTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: TemplateNode) {
        self.nodes.push(node);
    }

    pub fn with_node(mut self, node: TemplateNode) -> Self {
        self.push(node);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, Clone)]
pub enum TemplateNode {
    File(FileSpec),
    Directory(DirectorySpec),
}

impl TemplateNode {
    pub fn path(&self) -> &str {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileSpec {
    /// Raw path from the template root, `/`-separated
    pub path: String,
    pub content: TemplateContent,
}

impl FileSpec {
    pub fn new(path: impl Into<String>, content: TemplateContent) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }

    pub fn text(path: impl Into<String>, text: impl Into<TemplateSource>) -> Self {
        Self::new(path, TemplateContent::Text(text.into()))
    }
}

#[derive(Debug, Clone)]
pub struct DirectorySpec {
    pub path: String,
}

impl DirectorySpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

// ============================================================================
// Content Types
// ============================================================================

/// Content of a template file.
///
/// Text is rendered; anything that is not valid UTF-8 is copied verbatim.
#[derive(Debug, Clone)]
pub enum TemplateContent {
    Text(TemplateSource),
    Binary(Vec<u8>),
}

impl TemplateContent {
    /// Classify raw bytes read from disk.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::Text(TemplateSource::Owned(text)),
            Err(err) => Self::Binary(err.into_bytes()),
        }
    }
}

/// Source of text content: compile-time (built-in templates) or runtime.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }
}
