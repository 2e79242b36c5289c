//! Jinja rendering for deferred `.j2` files and computed variables.
//!
//! The first render pass only substitutes bare `{{ name }}` placeholders.
//! Files whose name ends in `.j2` are copied through untouched and rendered
//! here once the tree has its final shape, with the full Jinja language and
//! every computed variable available.
//!
//! The environment is strict: reading an undefined variable is an error,
//! never an empty string. Answers are visible by name and, for templates
//! written for cookiecutter, under `cookiecutter`.

use std::collections::{BTreeMap, BTreeSet};

use minijinja::{Environment, UndefinedBehavior, value::ValueKind};
use thiserror::Error;

use crate::domain::value::{Configuration, Selection, Value};

/// Suffix of files rendered after the transform.
pub const DEFERRED_SUFFIX: &str = ".j2";

const LEGACY_NAMESPACE: &str = "cookiecutter";

/// Compiled templates borrow their source, so the environment lives only
/// as long as the text it parses.
fn environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env
}

/// A Jinja template or expression failed to parse or evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct JinjaError(String);

impl From<minijinja::Error> for JinjaError {
    fn from(err: minijinja::Error) -> Self {
        Self(err.to_string())
    }
}

/// Whether a template path names a deferred file.
pub fn is_deferred(path: &str) -> bool {
    strip_deferred(path).is_some()
}

/// `setup.py.j2` -> `setup.py`; `None` when there is no `.j2` suffix or
/// nothing in front of it.
pub fn strip_deferred(name: &str) -> Option<&str> {
    name.strip_suffix(DEFERRED_SUFFIX)
        .filter(|stem| !stem.is_empty() && !stem.ends_with('/'))
}

/// Render a whole template. `name` only shows up in error messages.
pub fn render(name: &str, source: &str, config: &Configuration) -> Result<String, JinjaError> {
    Ok(environment().render_named_str(name, source, context(config))?)
}

/// Evaluate a single expression, e.g. `python_versions|first`.
///
/// Booleans stay booleans and sequences become lists; everything else is
/// taken by its text form.
pub fn evaluate(expression: &str, config: &Configuration) -> Result<Value, JinjaError> {
    let env = environment();
    let compiled = env.compile_expression(expression)?;
    let result = compiled.eval(context(config))?;
    match result.kind() {
        ValueKind::Bool => Ok(Value::Bool(result.is_true())),
        ValueKind::Seq | ValueKind::Iterable => Ok(Value::List(Selection::new(
            result.try_iter()?.map(|item| item.to_string()),
        ))),
        ValueKind::Undefined | ValueKind::None => {
            Err(JinjaError(format!("'{expression}' produced no value")))
        }
        _ => Ok(Value::Str(result.to_string())),
    }
}

/// Parse an expression without evaluating it.
pub fn check_expression(expression: &str) -> Result<(), JinjaError> {
    environment().compile_expression(expression)?;
    Ok(())
}

/// Parse `source` and list the top-level variables it reads.
///
/// `cookiecutter.name` is reported as `name`.
pub fn referenced_variables(name: &str, source: &str) -> Result<BTreeSet<String>, JinjaError> {
    let env = environment();
    let template = env.template_from_named_str(name, source)?;
    Ok(template
        .undeclared_variables(true)
        .into_iter()
        .map(|var| {
            let var = var
                .strip_prefix(LEGACY_NAMESPACE)
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(&var);
            var.split('.').next().unwrap_or(var).to_owned()
        })
        .filter(|var| var != LEGACY_NAMESPACE)
        .collect())
}

fn context(config: &Configuration) -> minijinja::Value {
    let mut vars: BTreeMap<&str, minijinja::Value> = config
        .iter()
        .map(|(name, value)| (name, minijinja::Value::from_serialize(value)))
        .collect();
    vars.insert(LEGACY_NAMESPACE, minijinja::Value::from_serialize(config));
    minijinja::Value::from_serialize(&vars)
}
