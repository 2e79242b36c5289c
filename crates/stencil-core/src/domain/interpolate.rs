//! Strict `{{ name }}` placeholder substitution.
//!
//! Recognised placeholders are `{{ name }}` and `{{ cookiecutter.name }}`
//! where `name` is `[A-Za-z_][A-Za-z0-9_]*`; inner whitespace is ignored.
//! `${{ ... }}` (CI expression syntax) is left untouched, so workflow files
//! pass through verbatim. Any other expression between double braces is
//! rejected: filters and logic belong in `.j2` files, which are rendered by
//! [`jinja`](crate::domain::jinja) after the tree is transformed.

use thiserror::Error;

/// A placeholder named a variable the lookup could not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("undefined variable '{0}'")]
pub struct UndefinedVariable(pub String);

/// Why a text could not be interpolated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
    #[error(transparent)]
    Undefined(#[from] UndefinedVariable),

    #[error("unsupported expression '{0}'")]
    Unsupported(String),
}

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const LEGACY_PREFIX: &str = "cookiecutter.";

/// One `{{ ... }}` occurrence.
enum Token<'t> {
    Placeholder(&'t str),
    Unsupported(&'t str),
    /// `${{ ... }}`, kept as is.
    Escaped,
}

/// Split `text` into literal runs and tokens; `visit` gets the literal text
/// before each token, the whole token text and its classification.
fn scan<'t, E>(
    text: &'t str,
    mut visit: impl FnMut(&'t str, &'t str, Token<'t>) -> Result<(), E>,
) -> Result<&'t str, E> {
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        let (before, after_open) = rest.split_at(start);
        let Some(end) = after_open[OPEN.len()..].find(CLOSE) else {
            break;
        };
        let whole = &after_open[..OPEN.len() + end + CLOSE.len()];
        let inner = &after_open[OPEN.len()..OPEN.len() + end];

        let token = if before.ends_with('$') {
            Token::Escaped
        } else {
            match placeholder_name(inner) {
                Some(name) => Token::Placeholder(name),
                None => Token::Unsupported(whole),
            }
        };
        visit(before, whole, token)?;
        rest = &after_open[whole.len()..];
    }
    Ok(rest)
}

/// Replace every placeholder in `text` using `lookup`.
pub fn interpolate<'a, F>(text: &str, lookup: F) -> Result<String, PlaceholderError>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(text.len());
    let rest = scan::<PlaceholderError>(text, |before, whole, token| {
        out.push_str(before);
        match token {
            Token::Placeholder(name) => {
                let value = lookup(name).ok_or_else(|| UndefinedVariable(name.to_owned()))?;
                out.push_str(value);
            }
            Token::Escaped => out.push_str(whole),
            Token::Unsupported(expr) => {
                return Err(PlaceholderError::Unsupported(expr.to_owned()));
            }
        }
        Ok(())
    })?;
    out.push_str(rest);
    Ok(out)
}

/// Names of all placeholders in `text`, in order of appearance.
pub fn placeholders(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    let _ = scan::<()>(text, |_, _, token| {
        if let Token::Placeholder(name) = token {
            names.push(name.to_owned());
        }
        Ok(())
    });
    names
}

/// The first double-brace expression in `text` that is not a placeholder.
pub fn first_unsupported(text: &str) -> Option<String> {
    scan(text, |_, _, token| match token {
        Token::Unsupported(expr) => Err(expr.to_owned()),
        _ => Ok(()),
    })
    .err()
}

fn placeholder_name(inner: &str) -> Option<&str> {
    let trimmed = inner.trim();
    let name = trimmed.strip_prefix(LEGACY_PREFIX).unwrap_or(trimmed);
    let mut chars = name.chars();
    let first = chars.next()?;
    let valid = (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<&'static str> {
        match name {
            "package_name" => Some("acme_tools"),
            "namespace" => Some("acme"),
            _ => None,
        }
    }

    #[test]
    fn substitutes_both_spellings() {
        let out = interpolate(
            "src/{{ namespace }}/{{cookiecutter.package_name}}",
            lookup,
        )
        .unwrap();
        assert_eq!(out, "src/acme/acme_tools");
    }

    #[test]
    fn leaves_ci_expressions_alone() {
        let text = "python-version: ${{ matrix.python }}\nrun: ${{ runner }}";
        assert_eq!(interpolate(text, lookup).unwrap(), text);
    }

    #[test]
    fn filter_expressions_are_rejected() {
        assert_eq!(
            interpolate("{{ undefined_var | upper }}", lookup),
            Err(PlaceholderError::Unsupported("{{ undefined_var | upper }}".into()))
        );
        let legacy = "{{cookiecutter.github_email|replace(' AT ', '@')}}";
        assert_eq!(
            interpolate(legacy, lookup),
            Err(PlaceholderError::Unsupported(legacy.into()))
        );
        assert_eq!(
            first_unsupported("ok {{ namespace }} then {{ }}"),
            Some("{{ }}".into())
        );
        assert_eq!(first_unsupported("${{ matrix.os }} {{ namespace }}"), None);
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        assert_eq!(interpolate("a {{ b", lookup).unwrap(), "a {{ b");
    }

    #[test]
    fn undefined_variable_is_an_error() {
        assert_eq!(
            interpolate("{{ author_email }}", lookup),
            Err(UndefinedVariable("author_email".into()).into())
        );
    }

    #[test]
    fn placeholders_lists_names_in_order() {
        assert_eq!(
            placeholders("{{ b }} ${{ skip }} {{cookiecutter.a}} {{ x|y }} {{ b }}"),
            ["b", "a", "b"]
        );
    }
}
