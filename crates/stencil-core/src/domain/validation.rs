use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::domain::{
    error::{TemplateError, ValidationError},
    jinja,
    rules::{VariableDecl, VariableKind, parse_bool},
    value::{Configuration, RawAnswers, Selection, Value},
};

/// What to do with answers for variables the template never declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ValidationMode {
    /// Log and ignore them.
    #[default]
    Lenient,
    /// Reject the whole set.
    Strict,
}

impl ValidationMode {
    pub const fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }

    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        })
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown validation mode: {other}")),
        }
    }
}

/// Registry of declared variables, keyed by name, in declaration order.
///
/// [`TemplateSchema::validate`] is the pre-generation check: variables are
/// checked in declaration order and the first failure is returned. On
/// success every declared variable has a value in the resulting
/// [`Configuration`]; undeclared answers never reach it. Computed variables
/// are evaluated in the same pass, so they can read anything declared above
/// them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateSchema {
    decls: IndexMap<String, VariableDecl>,
}

impl TemplateSchema {
    pub fn new(decls: impl IntoIterator<Item = VariableDecl>) -> Result<Self, TemplateError> {
        let mut map = IndexMap::new();
        for decl in decls {
            let name = decl.name().to_owned();
            if map.insert(name.clone(), decl).is_some() {
                return Err(TemplateError::DuplicateVariable(name));
            }
        }
        Ok(Self { decls: map })
    }

    pub fn get(&self, name: &str) -> Option<&VariableDecl> {
        self.decls.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.decls.contains_key(name)
    }

    pub fn variables(&self) -> impl Iterator<Item = &VariableDecl> {
        self.decls.values()
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Variables a user can answer that have no answer in `answers` yet.
    /// Variables with a default are included; computed ones are not.
    pub fn unanswered<'s>(
        &'s self,
        answers: &'s RawAnswers,
    ) -> impl Iterator<Item = &'s VariableDecl> {
        self.decls
            .values()
            .filter(|d| !d.is_computed() && !answers.contains_key(d.name()))
    }

    /// Whether an answer named `name` is accepted. Computed variables take
    /// no answers.
    pub fn accepts(&self, name: &str) -> bool {
        self.decls.get(name).is_some_and(|d| !d.is_computed())
    }

    pub fn validate(
        &self,
        answers: &RawAnswers,
        mode: ValidationMode,
    ) -> Result<Configuration, ValidationError> {
        for name in answers.keys().filter(|k| !self.accepts(k)) {
            match mode {
                ValidationMode::Strict => {
                    return Err(ValidationError::UnknownVariable {
                        variable: name.clone(),
                    });
                }
                ValidationMode::Lenient => warn!(variable = %name, "ignoring undeclared answer"),
            }
        }

        let mut config = Configuration::new();
        for decl in self.decls.values() {
            let value = match decl.expression() {
                Some(expression) => compute(decl, expression, &config)?,
                None => resolve(decl, answers.get(decl.name()).map(String::as_str))?,
            };
            debug!(variable = decl.name(), value = %value, "answer accepted");
            config.insert(decl.name(), value);
        }
        Ok(config)
    }
}

/// Turn one raw answer (or its absence) into a checked value.
///
/// A blank answer for a variable with a default counts as no answer.
fn resolve(decl: &VariableDecl, raw: Option<&str>) -> Result<Value, ValidationError> {
    let name = decl.name();
    let raw = raw.filter(|r| !r.trim().is_empty() || decl.default().is_none());
    let Some(raw) = raw.or_else(|| decl.default()) else {
        return match decl.kind() {
            _ if decl.is_required() => Err(ValidationError::Missing {
                variable: name.to_owned(),
            }),
            VariableKind::Bool => Ok(Value::Bool(false)),
            VariableKind::Choice => Err(ValidationError::Missing {
                variable: name.to_owned(),
            }),
            VariableKind::MultiSelect => Ok(Value::List(Selection::default())),
            VariableKind::String => Ok(Value::Str(String::new())),
        };
    };

    let value = decl.normalize(raw);
    match decl.kind() {
        VariableKind::Bool => parse_bool(&value)
            .map(Value::Bool)
            .ok_or_else(|| ValidationError::InvalidBool {
                variable: name.to_owned(),
                value,
            }),
        VariableKind::Choice => {
            decl.check(&value)?;
            Ok(Value::Choice(value))
        }
        VariableKind::MultiSelect => select(decl, &value).map(Value::List),
        VariableKind::String => {
            decl.check(&value)?;
            Ok(Value::Str(value))
        }
    }
}

/// Split `a, b` into items, check each one and order them as declared.
fn select(decl: &VariableDecl, value: &str) -> Result<Selection, ValidationError> {
    let picked: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();
    if picked.is_empty() && decl.is_required() {
        return Err(ValidationError::Empty {
            variable: decl.name().to_owned(),
        });
    }
    for item in &picked {
        decl.check(item)?;
    }
    let choices = decl.choices().unwrap_or_default();
    Ok(Selection::new(
        choices.iter().filter(|c| picked.contains(&c.as_str())).cloned(),
    ))
}

fn compute(
    decl: &VariableDecl,
    expression: &str,
    config: &Configuration,
) -> Result<Value, ValidationError> {
    jinja::evaluate(expression, config).map_err(|e| ValidationError::ComputeFailed {
        variable: decl.name().to_owned(),
        reason: e.to_string(),
    })
}
