// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

use crate::error::StencilError;

// ============================================================================
// Validation (pre-generation)
// ============================================================================

/// An answer failed a declared rule.
///
/// Every variant names the offending variable; [`ValidationError::rule`]
/// names the rule that rejected it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{variable}' is required but no value was supplied")]
    Missing { variable: String },

    #[error("'{variable}' must not be empty")]
    Empty { variable: String },

    #[error("'{variable}' = '{value}' does not match {pattern}")]
    PatternMismatch {
        variable: String,
        value: String,
        pattern: String,
    },

    #[error("'{variable}' = '{value}' is not one of [{}]", allowed.join(", "))]
    NotOneOf {
        variable: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("'{variable}' = '{value}' is not a valid e-mail address")]
    InvalidEmail { variable: String, value: String },

    #[error("'{variable}' = '{value}' is not a yes/no answer")]
    InvalidBool { variable: String, value: String },

    #[error("'{variable}' is not declared by this template")]
    UnknownVariable { variable: String },

    #[error("computing '{variable}' failed: {reason}")]
    ComputeFailed { variable: String, reason: String },
}

impl ValidationError {
    /// The variable whose answer was rejected.
    pub fn variable(&self) -> &str {
        match self {
            Self::Missing { variable }
            | Self::Empty { variable }
            | Self::PatternMismatch { variable, .. }
            | Self::NotOneOf { variable, .. }
            | Self::InvalidEmail { variable, .. }
            | Self::InvalidBool { variable, .. }
            | Self::UnknownVariable { variable }
            | Self::ComputeFailed { variable, .. } => variable,
        }
    }

    /// The rule that rejected it.
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::Missing { .. } | Self::Empty { .. } => "required",
            Self::PatternMismatch { .. } => "pattern",
            Self::NotOneOf { .. } => "one-of",
            Self::InvalidEmail { .. } => "email",
            Self::InvalidBool { .. } => "bool",
            Self::UnknownVariable { .. } => "declared",
            Self::ComputeFailed { .. } => "computed",
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Missing { variable } | Self::Empty { variable } => vec![
                format!("Provide a value: --set {variable}=<value>"),
                "Or add it to your answers file".into(),
            ],
            Self::PatternMismatch { pattern, .. } => vec![
                format!("Value must match: {pattern}"),
                "Start with a letter and use at least 3 characters".into(),
            ],
            Self::NotOneOf { allowed, .. } => {
                vec![format!("Choose one of: {}", allowed.join(", "))]
            }
            Self::InvalidEmail { .. } => vec![
                "Use the form name@example.org".into(),
                "'name AT example.org' is also accepted".into(),
            ],
            Self::InvalidBool { .. } => vec!["Use yes/no, true/false, y/n or 1/0".into()],
            Self::UnknownVariable { .. } => vec![
                "Remove the variable from your answers".into(),
                "Or pass --lenient to ignore undeclared answers".into(),
                "Try: stencil variables <TEMPLATE_DIR>".into(),
            ],
            Self::ComputeFailed { .. } => vec![
                "Check the answers the expression reads".into(),
                "Fix the 'computed' expression in template.toml".into(),
            ],
        }
    }
}

// ============================================================================
// Transformation (post-generation)
// ============================================================================

/// The rendered tree could not be brought into its final shape.
#[derive(Debug, Error, Clone)]
pub enum TransformError {
    #[error("path '{path}' is not allowed: {reason}")]
    PathEscape { path: String, reason: String },

    #[error("action rule '{rule}' references undefined variable '{variable}'")]
    UndefinedVariable { variable: String, rule: String },

    #[error("action rule '{rule}' is invalid: {reason}")]
    InvalidRule { rule: String, reason: String },

    #[error("conflicting actions for '{path}': {first} vs {second}")]
    ConflictingActions {
        path: String,
        first: String,
        second: String,
    },

    #[error("cannot rename '{}' to '{}': target already exists", from.display(), to.display())]
    RenameTargetExists { from: PathBuf, to: PathBuf },

    #[error("cannot render '{}' to '{}': target already exists", from.display(), to.display())]
    RenderTargetExists { from: PathBuf, to: PathBuf },

    #[error("rendering '{path}' failed: {reason}")]
    RenderFailed { path: String, reason: String },

    #[error("rendered tree not found at {}", path.display())]
    RootMissing { path: PathBuf },

    #[error("transformation aborted after {} completed action(s): {source}", completed.len())]
    Aborted {
        completed: Vec<String>,
        #[source]
        source: Box<StencilError>,
    },
}

impl TransformError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PathEscape { path, .. } => vec![
                format!("Check the value producing '{path}'"),
                "Answers used in paths must not contain '..' or start with '/'".into(),
            ],
            Self::UndefinedVariable { variable, .. } => vec![
                format!("Declare '{variable}' in template.toml"),
                "Or fix the placeholder spelling in the action".into(),
            ],
            Self::InvalidRule { .. } => vec![
                "Fix the action in template.toml".into(),
                "Targets only take {{ name }} placeholders".into(),
            ],
            Self::ConflictingActions { .. } => {
                vec!["Make the conditions of the two rules mutually exclusive".into()]
            }
            Self::RenameTargetExists { to, .. } => vec![
                format!("Remove or rename '{}' first", to.display()),
                "The template may render both names; add a remove action".into(),
            ],
            Self::RenderTargetExists { to, .. } => vec![
                format!("Remove '{}' from the template or render to another name", to.display()),
            ],
            Self::RenderFailed { .. } => vec![
                "Every variable a .j2 file reads must be declared or computed".into(),
                "List them with: stencil variables <TEMPLATE_DIR>".into(),
            ],
            Self::RootMissing { .. } => vec!["Check the rendered directory path".into()],
            Self::Aborted { completed, .. } => {
                let mut tips = vec!["The tree is partially transformed".into()];
                tips.extend(completed.iter().map(|c| format!("  done: {c}")));
                tips
            }
        }
    }

    /// Actions applied before the failure, in order.
    pub fn completed(&self) -> &[String] {
        match self {
            Self::Aborted { completed, .. } => completed,
            _ => &[],
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("undefined variable '{variable}' in {path}")]
    UndefinedVariable { variable: String, path: String },

    #[error("unsupported expression {expression} in {path}")]
    UnsupportedExpression { expression: String, path: String },

    #[error("rendered path '{path}' is invalid: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("two template entries render to '{path}'")]
    DuplicatePath { path: String },

    #[error("template '{name}' has no content")]
    EmptyTemplate { name: String },
}

impl RenderError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UndefinedVariable { variable, .. } => vec![
                format!("Declare '{variable}' in template.toml"),
                "Only declared variables are available to templates".into(),
            ],
            Self::UnsupportedExpression { .. } => vec![
                "Only {{ name }} placeholders are substituted here".into(),
                "Move filters and logic into a .j2 file with a render action".into(),
            ],
            Self::InvalidPath { .. } => {
                vec!["Answers used in file names must be plain names".into()]
            }
            Self::DuplicatePath { .. } => {
                vec!["Two template files collapse to the same name for these answers".into()]
            }
            Self::EmptyTemplate { .. } => vec!["Add files to the template directory".into()],
        }
    }
}

// ============================================================================
// Template definition
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("variable '{0}' is declared twice")]
    DuplicateVariable(String),

    #[error("'{path}' references undeclared variable '{variable}'")]
    UndeclaredVariable { path: String, variable: String },

    #[error("template path '{path}' appears twice")]
    DuplicatePath { path: String },

    #[error("'{path}' uses unsupported expression {expression}")]
    UnsupportedExpression { path: String, expression: String },

    #[error("invalid Jinja in '{path}': {reason}")]
    InvalidJinja { path: String, reason: String },

    #[error("invalid pattern for '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("invalid template manifest: {0}")]
    InvalidManifest(String),
}

impl TemplateError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DuplicateVariable(name) => {
                vec![format!("Keep a single [[variables]] entry for '{name}'")]
            }
            Self::UndeclaredVariable { variable, .. } => {
                vec![format!("Add a [[variables]] entry named '{variable}'")]
            }
            Self::DuplicatePath { path } => {
                vec![format!("Remove one of the '{path}' entries")]
            }
            Self::UnsupportedExpression { .. } => vec![
                "Plain files only take {{ name }} placeholders".into(),
                "Rename the file to *.j2 and add a render action for Jinja".into(),
            ],
            Self::InvalidJinja { .. } => vec!["Fix the template syntax".into()],
            Self::InvalidPattern { .. } => vec![
                "Use 'word', 'identifier' or a valid regular expression".into(),
            ],
            Self::InvalidManifest(_) => vec!["Check template.toml syntax".into()],
        }
    }
}
