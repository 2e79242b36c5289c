//! Declarative per-variable rules.
//!
//! Each template variable is described by a [`VariableDecl`]: its kind, the
//! [`Rule`]s its answer must satisfy, an optional default, and sentinel values
//! that bypass format checks. Rules are plain data; checking them is a pure
//! function of the answer.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::{TemplateError, ValidationError};

/// Sentinel meaning "this optional path segment is not wanted".
pub const REMOVE_ME: &str = ".remove.me";

pub const WORD_PATTERN: &str = r"^[a-zA-Z][-_0-9a-zA-Z]{2,}$";
pub const IDENTIFIER_PATTERN: &str = r"^[a-zA-Z][_0-9a-zA-Z]{2,}$";
pub const EMAIL_PATTERN: &str = r"^\S+@\S+$";

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WORD_PATTERN).expect("Failed to initialize the word regex"));
static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(IDENTIFIER_PATTERN).expect("Failed to initialize the identifier regex")
});
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("Failed to initialize the email regex"));

// ── Pattern ──────────────────────────────────────────────────────────────────

/// A format an answer must match.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Project-name style: letters, digits, `-` and `_`, at least 3 chars.
    Word,
    /// Python identifier style: letters, digits and `_`, at least 3 chars.
    Identifier,
    /// Any other regular expression.
    Custom(Regex),
}

impl Pattern {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Word => WORD_PATTERN,
            Self::Identifier => IDENTIFIER_PATTERN,
            Self::Custom(re) => re.as_str(),
        }
    }

    pub fn is_match(&self, value: &str) -> bool {
        match self {
            Self::Word => WORD_RE.is_match(value),
            Self::Identifier => IDENTIFIER_RE.is_match(value),
            Self::Custom(re) => re.is_match(value),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl FromStr for Pattern {
    type Err = regex::Error;

    /// `word` and `identifier` select the built-in patterns; anything else is
    /// compiled as a regular expression.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "word" => Ok(Self::Word),
            "identifier" | "iden" => Ok(Self::Identifier),
            other => Regex::new(other).map(Self::Custom),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Rule ─────────────────────────────────────────────────────────────────────

/// One declarative check on a single answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// The answer must not be empty.
    Required,
    /// The answer must match a pattern.
    Pattern(Pattern),
    /// The answer must be one of the listed values.
    OneOf(Vec<String>),
    /// The answer must look like an e-mail address.
    Email,
}

impl Rule {
    /// Short rule label used in error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Pattern(_) => "pattern",
            Self::OneOf(_) => "one-of",
            Self::Email => "email",
        }
    }

    /// Whether the rule checks format (and is therefore skipped for
    /// sentinel values).
    const fn is_format(&self) -> bool {
        matches!(self, Self::Pattern(_) | Self::Email)
    }

    /// Check `value` (already normalised) for `variable`.
    pub fn check(&self, variable: &str, value: &str) -> Result<(), ValidationError> {
        match self {
            Self::Required if value.is_empty() => Err(ValidationError::Empty {
                variable: variable.to_owned(),
            }),
            Self::Pattern(pattern) if !pattern.is_match(value) => {
                Err(ValidationError::PatternMismatch {
                    variable: variable.to_owned(),
                    value: value.to_owned(),
                    pattern: pattern.as_str().to_owned(),
                })
            }
            Self::OneOf(allowed) if !allowed.iter().any(|a| a == value) => {
                Err(ValidationError::NotOneOf {
                    variable: variable.to_owned(),
                    value: value.to_owned(),
                    allowed: allowed.clone(),
                })
            }
            Self::Email if !EMAIL_RE.is_match(value) => Err(ValidationError::InvalidEmail {
                variable: variable.to_owned(),
                value: value.to_owned(),
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::Pattern(p) => write!(f, "matches {p}"),
            Self::OneOf(allowed) => write!(f, "one of [{}]", allowed.join(", ")),
            Self::Email => f.write_str("e-mail address"),
        }
    }
}

// ── VariableKind ─────────────────────────────────────────────────────────────

/// How an answer is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    #[default]
    String,
    Bool,
    Choice,
    /// Any subset of a declared set, answered as `a,b,c`.
    #[serde(rename = "multiselect")]
    MultiSelect,
}

impl VariableKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Choice => "choice",
            Self::MultiSelect => "multiselect",
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariableKind {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "str" | "text" => Ok(Self::String),
            "bool" | "boolean" => Ok(Self::Bool),
            "choice" | "select" | "enum" => Ok(Self::Choice),
            "multiselect" | "multi" | "list" => Ok(Self::MultiSelect),
            other => Err(TemplateError::InvalidManifest(format!(
                "unknown variable kind: {other}"
            ))),
        }
    }
}

// ── VariableDecl ─────────────────────────────────────────────────────────────

/// Declaration of one template variable.
///
/// ```
/// use stencil_core::domain::{Pattern, VariableDecl, REMOVE_ME};
///
/// let ns = VariableDecl::string("namespace")
///     .pattern(Pattern::Identifier)
///     .exempt(REMOVE_ME)
///     .default_value(REMOVE_ME);
/// assert_eq!(ns.name(), "namespace");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    name: String,
    kind: VariableKind,
    rules: Vec<Rule>,
    default: Option<String>,
    exempt: Vec<String>,
    description: Option<String>,
    computed: Option<String>,
}

impl VariableDecl {
    fn new(name: impl Into<String>, kind: VariableKind) -> Self {
        Self {
            name: name.into(),
            kind,
            rules: Vec::new(),
            default: None,
            exempt: Vec::new(),
            description: None,
            computed: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::String)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::Bool)
    }

    /// A choice variable; its answer must be one of `choices`.
    pub fn choice<I, S>(name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut decl = Self::new(name, VariableKind::Choice);
        decl.rules
            .push(Rule::OneOf(choices.into_iter().map(Into::into).collect()));
        decl
    }

    /// A multi-select variable; every selected item must be one of `choices`.
    pub fn multiselect<I, S>(name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut decl = Self::new(name, VariableKind::MultiSelect);
        decl.rules
            .push(Rule::OneOf(choices.into_iter().map(Into::into).collect()));
        decl
    }

    /// A variable derived from the answers by a Jinja expression.
    ///
    /// Computed variables are never asked for; they are evaluated after every
    /// answered variable declared before them.
    pub fn computed(name: impl Into<String>, expression: impl Into<String>) -> Self {
        let mut decl = Self::new(name, VariableKind::String);
        decl.computed = Some(expression.into());
        decl
    }

    pub fn required(mut self) -> Self {
        if !self.is_required() {
            self.rules.insert(0, Rule::Required);
        }
        self
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.rules.push(Rule::Pattern(pattern));
        self
    }

    pub fn email(mut self) -> Self {
        self.rules.push(Rule::Email);
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// A value that skips pattern and e-mail checks.
    pub fn exempt(mut self, value: impl Into<String>) -> Self {
        self.exempt.push(value.into());
        self
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    // ── accessors ────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn exemptions(&self) -> &[String] {
        &self.exempt
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Expression of a computed variable.
    pub fn expression(&self) -> Option<&str> {
        self.computed.as_deref()
    }

    pub fn is_computed(&self) -> bool {
        self.computed.is_some()
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }

    pub fn is_email(&self) -> bool {
        self.rules.contains(&Rule::Email)
    }

    /// Allowed values for choice variables.
    pub fn choices(&self) -> Option<&[String]> {
        self.rules.iter().find_map(|r| match r {
            Rule::OneOf(values) => Some(values.as_slice()),
            _ => None,
        })
    }

    // ── checking ─────────────────────────────────────────────────────────

    /// Trim and de-obfuscate a raw answer.
    pub fn normalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if self.is_email() {
            trimmed.replace(" AT ", "@")
        } else {
            trimmed.to_owned()
        }
    }

    /// Run every rule against an already normalised value.
    ///
    /// An empty value skips format rules only when the variable is optional
    /// and has no default to stand in for it.
    pub(crate) fn check(&self, value: &str) -> Result<(), ValidationError> {
        let exempt = self.exempt.iter().any(|e| e == value);
        let optional_empty = value.is_empty()
            && !self.is_required()
            && self.default().is_none_or(|d| d.trim().is_empty());
        for rule in &self.rules {
            if (exempt || optional_empty) && rule.is_format() {
                continue;
            }
            if optional_empty && matches!(rule, Rule::OneOf(_)) && self.kind != VariableKind::Choice
            {
                continue;
            }
            rule.check(&self.name, value)?;
        }
        Ok(())
    }
}

/// Parse a yes/no answer the way interactive prompts accept it.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "t" | "1" | "on" => Some(true),
        "no" | "n" | "false" | "f" | "0" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_and_identifier_differ_on_dashes() {
        assert!(Pattern::Word.is_match("my-project"));
        assert!(!Pattern::Identifier.is_match("my-project"));
        assert!(Pattern::Identifier.is_match("my_project"));
    }

    #[test]
    fn patterns_need_three_characters_and_a_leading_letter() {
        assert!(!Pattern::Word.is_match("ab"));
        assert!(!Pattern::Identifier.is_match("1abc"));
        assert!(!Pattern::Identifier.is_match("../evil"));
    }

    #[test]
    fn pattern_from_str_knows_builtin_names() {
        assert_eq!("word".parse::<Pattern>().unwrap(), Pattern::Word);
        assert_eq!("identifier".parse::<Pattern>().unwrap(), Pattern::Identifier);
        assert!(matches!(
            "^v[0-9]+$".parse::<Pattern>().unwrap(),
            Pattern::Custom(_)
        ));
        assert!("(".parse::<Pattern>().is_err());
    }

    #[test]
    fn required_rule_rejects_empty() {
        let err = Rule::Required.check("team_name", "").unwrap_err();
        assert_eq!(err.variable(), "team_name");
        assert_eq!(err.rule(), "required");
    }

    #[test]
    fn one_of_lists_allowed_values() {
        let rule = Rule::OneOf(vec!["MIT".into(), "Apache-2.0".into()]);
        match rule.check("license", "WTFPL").unwrap_err() {
            ValidationError::NotOneOf { allowed, .. } => assert_eq!(allowed.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn email_is_de_obfuscated_before_checking() {
        let decl = VariableDecl::string("author_email").required().email();
        let value = decl.normalize("  jane AT example.org ");
        assert_eq!(value, "jane@example.org");
        assert!(decl.check(&value).is_ok());
    }

    #[test]
    fn sentinel_skips_format_rules() {
        let decl = VariableDecl::string("namespace")
            .pattern(Pattern::Identifier)
            .exempt(REMOVE_ME);
        assert!(decl.check(REMOVE_ME).is_ok());
        assert!(decl.check(".other").is_err());
    }

    #[test]
    fn optional_empty_string_skips_format_rules() {
        let decl = VariableDecl::string("homepage").pattern(Pattern::Word);
        assert!(decl.check("").is_ok());
    }

    #[test]
    fn empty_value_is_checked_when_a_default_exists() {
        let decl = VariableDecl::string("entry_point_source")
            .pattern(Pattern::Identifier)
            .default_value("main");
        let err = decl.check("").unwrap_err();
        assert_eq!(err.variable(), "entry_point_source");
        assert_eq!(err.rule(), "pattern");
    }

    #[test]
    fn multiselect_kind_parses_from_manifest_spellings() {
        assert_eq!("multiselect".parse::<VariableKind>(), Ok(VariableKind::MultiSelect));
        assert_eq!("list".parse::<VariableKind>(), Ok(VariableKind::MultiSelect));
        assert_eq!(VariableKind::MultiSelect.to_string(), "multiselect");
    }

    #[test]
    fn computed_variables_carry_their_expression() {
        let decl = VariableDecl::computed("least_python3", "python_versions|first");
        assert!(decl.is_computed());
        assert_eq!(decl.expression(), Some("python_versions|first"));
        assert!(!VariableDecl::string("x").is_computed());
    }

    #[test]
    fn required_is_not_duplicated() {
        let decl = VariableDecl::string("x").required().required();
        assert_eq!(decl.rules().len(), 1);
    }

    #[test]
    fn parse_bool_accepts_prompt_spellings() {
        for yes in ["y", "Yes", "TRUE", "t", "1"] {
            assert_eq!(parse_bool(yes), Some(true), "{yes}");
        }
        for no in ["n", "No", "false", "F", "0"] {
            assert_eq!(parse_bool(no), Some(false), "{no}");
        }
        assert_eq!(parse_bool("maybe"), None);
    }
}
