//! Answers files and `--set name=value` assignments.
//!
//! An answers file is a flat table of `name = value` pairs in TOML (`.toml`)
//! or JSON (`.json`). A file written for cookiecutter, where the pairs sit in
//! a `cookiecutter` table, is accepted too. Booleans and numbers are turned
//! into their text form, and an array of them (a multiselect answer) into
//! `a,b,c`; the validator decides what they mean.

use std::{fs, path::Path};

use stencil_core::{application::ApplicationError, domain::RawAnswers, error::StencilResult};
use tracing::{debug, instrument};

use crate::template_loader::scalar_to_string;

/// Table name under which cookiecutter-style files keep their answers.
const LEGACY_TABLE: &str = "cookiecutter";

/// Read answers from `path`, choosing the format by extension.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_answers(path: &Path) -> StencilResult<RawAnswers> {
    let invalid = |reason: String| ApplicationError::InvalidAnswers {
        path: path.to_path_buf(),
        reason,
    };

    let raw = fs::read_to_string(path).map_err(|e| ApplicationError::io(path, &e))?;
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());

    let answers = match extension.as_deref() {
        Some("toml") => {
            let table: toml::Table = toml::from_str(&raw).map_err(|e| invalid(e.to_string()))?;
            from_toml(table).map_err(invalid)?
        }
        Some("json") => {
            let value: serde_json::Value =
                serde_json::from_str(&raw).map_err(|e| invalid(e.to_string()))?;
            from_json(value).map_err(invalid)?
        }
        other => {
            return Err(invalid(format!(
                "unsupported extension {}; use .toml or .json",
                other.map_or_else(|| "(none)".to_owned(), |e| format!(".{e}"))
            ))
            .into());
        }
    };

    debug!(count = answers.len(), "answers loaded");
    Ok(answers)
}

/// Parse one `name=value` assignment. The value may be empty or contain `=`.
pub fn parse_assignment(raw: &str) -> StencilResult<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_owned(), value.to_owned()))
        }
        _ => Err(ApplicationError::InvalidAnswers {
            path: "--set".into(),
            reason: format!("expected name=value, got '{raw}'"),
        }
        .into()),
    }
}

fn from_toml(mut table: toml::Table) -> Result<RawAnswers, String> {
    if let Some(toml::Value::Table(inner)) = table.remove(LEGACY_TABLE) {
        table = inner;
    }
    table
        .into_iter()
        .map(|(name, value)| {
            let text = match &value {
                toml::Value::Array(items) => join_items(items.iter().map(scalar_to_string)),
                other => scalar_to_string(other),
            };
            match text {
                Some(text) => Ok((name, text)),
                None => Err(format!(
                    "'{name}' must be a string, boolean, number or a list of them, got {}",
                    value.type_str()
                )),
            }
        })
        .collect()
}

fn from_json(value: serde_json::Value) -> Result<RawAnswers, String> {
    let serde_json::Value::Object(mut object) = value else {
        return Err("top level must be an object".into());
    };
    if let Some(serde_json::Value::Object(inner)) = object.remove(LEGACY_TABLE) {
        object = inner;
    }
    object
        .into_iter()
        .map(|(name, value)| {
            let text = match &value {
                serde_json::Value::Array(items) => join_items(items.iter().map(json_scalar)),
                other => json_scalar(other),
            };
            text.map(|text| (name.clone(), text)).ok_or_else(|| {
                format!("'{name}' must be a string, boolean, number or a list of them")
            })
        })
        .collect()
}

fn json_scalar(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `["3.8", "3.9"]` -> `3.8,3.9`; `None` if any item is not a scalar.
fn join_items(items: impl Iterator<Item = Option<String>>) -> Option<String> {
    items
        .collect::<Option<Vec<_>>>()
        .map(|items| items.join(","))
}
