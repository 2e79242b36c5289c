//! Answer values and the validated [`Configuration`].
//!
//! A [`Configuration`] is only ever produced by
//! [`TemplateSchema::validate`](crate::domain::TemplateSchema::validate): outside this
//! crate it is read-only.

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::domain::interpolate::{self, PlaceholderError};

/// Raw answers as typed by the user or read from an answers file, in the
/// order they were supplied.
pub type RawAnswers = IndexMap<String, String>;

// ── Value ────────────────────────────────────────────────────────────────────

/// A resolved, validated answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Free-form text (already trimmed and normalised).
    Str(String),
    /// Yes/no answer.
    Bool(bool),
    /// One value out of a declared set.
    Choice(String),
    /// Several values out of a declared set, in declaration order.
    List(Selection),
}

impl Value {
    /// Text form of the value, as substituted into templates.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Str(s) | Self::Choice(s) => s,
            Self::Bool(true) => "true",
            Self::Bool(false) => "false",
            Self::List(selection) => selection.as_str(),
        }
    }

    /// `Some(b)` for boolean values, `None` otherwise.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

/// Items of a multi-select answer.
///
/// The text form joins the items with `,`, the same shape the answer is
/// given in; Jinja sees a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<String>,
    text: String,
}

impl Selection {
    pub fn new(items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        let text = items.join(",");
        Self { items, text }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

// ── Configuration ────────────────────────────────────────────────────────────

/// Validated answers for one generation run, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Configuration {
    values: IndexMap<String, Value>,
}

impl Configuration {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Text form of a variable, if present.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(Value::as_text)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Substitute every `{{ name }}` placeholder in `text`.
    ///
    /// Fails on the first placeholder naming a variable this configuration
    /// does not hold, or on any expression that is not a bare placeholder;
    /// nothing is substituted with an empty string.
    pub fn interpolate(&self, text: &str) -> Result<String, PlaceholderError> {
        interpolate::interpolate(text, |name| self.text(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interpolate::UndefinedVariable;

    fn sample() -> Configuration {
        let mut cfg = Configuration::new();
        cfg.insert("project_name", Value::Str("demo-app".into()));
        cfg.insert("initialize_git", Value::Bool(true));
        cfg.insert("license", Value::Choice("MIT".into()));
        cfg
    }

    #[test]
    fn keeps_declaration_order() {
        let names: Vec<_> = sample().names().map(str::to_owned).collect();
        assert_eq!(names, ["project_name", "initialize_git", "license"]);
    }

    #[test]
    fn bool_renders_as_lowercase_text() {
        assert_eq!(sample().text("initialize_git"), Some("true"));
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn interpolate_uses_values() {
        let out = sample().interpolate("{{ project_name }} ({{license}})").unwrap();
        assert_eq!(out, "demo-app (MIT)");
    }

    #[test]
    fn selection_reads_as_comma_list() {
        let value = Value::List(Selection::new(["3.8", "3.9"]));
        assert_eq!(value.as_text(), "3.8,3.9");
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"["3.8","3.9"]"#
        );
    }

    #[test]
    fn interpolate_rejects_unknown_variable() {
        let err = sample().interpolate("{{ author }}").unwrap_err();
        assert_eq!(err, UndefinedVariable("author".into()).into());
    }
}
