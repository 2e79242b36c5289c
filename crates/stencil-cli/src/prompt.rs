//! Interactive questions for answers that are still missing.
//!
//! Only compiled with the `interactive` feature. Prompts are shown only when
//! stdin is a terminal; otherwise every function is a no-op and validation
//! reports what is missing. Every unanswered variable is asked, with its
//! default pre-filled; computed variables are never asked.

use std::io::IsTerminal as _;

use stencil_core::domain::{RawAnswers, Template, VariableDecl};

use crate::error::CliResult;

/// `true` when questions can be asked.
pub fn can_prompt() -> bool {
    cfg!(feature = "interactive") && std::io::stdin().is_terminal()
}

/// Ask for every declared variable that has no answer yet.
pub fn fill_missing(template: &Template, answers: &mut RawAnswers) -> CliResult<()> {
    if !can_prompt() {
        return Ok(());
    }
    let missing: Vec<VariableDecl> = template.schema.unanswered(answers).cloned().collect();
    for decl in &missing {
        let value = ask(decl, None)?;
        answers.insert(decl.name().to_owned(), value);
    }
    Ok(())
}

/// Ask again for one variable whose answer failed validation.
pub fn ask_again(decl: &VariableDecl, previous: Option<&str>) -> CliResult<String> {
    ask(decl, previous)
}

/// Ask the user to go ahead.
#[cfg(feature = "interactive")]
pub fn confirm(question: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(question)
        .default(true)
        .interact()
        .map_err(prompt_error)
}

#[cfg(not(feature = "interactive"))]
pub fn confirm(_question: &str) -> CliResult<bool> {
    Ok(true)
}

#[cfg(feature = "interactive")]
fn ask(decl: &VariableDecl, previous: Option<&str>) -> CliResult<String> {
    use dialoguer::{Confirm, Input, MultiSelect, Select};
    use stencil_core::domain::{VariableKind, parse_bool};

    let prompt = match decl.description() {
        Some(text) => format!("{} ({text})", decl.name()),
        None => decl.name().to_owned(),
    };

    match decl.kind() {
        VariableKind::Bool => {
            let default = previous
                .or(decl.default())
                .and_then(parse_bool)
                .unwrap_or(false);
            let answer = Confirm::new()
                .with_prompt(prompt)
                .default(default)
                .interact()
                .map_err(prompt_error)?;
            Ok(answer.to_string())
        }
        VariableKind::Choice => {
            let choices = decl.choices().unwrap_or_default();
            let default = decl
                .default()
                .and_then(|d| choices.iter().position(|c| c == d))
                .unwrap_or(0);
            let index = Select::new()
                .with_prompt(prompt)
                .items(choices)
                .default(default)
                .interact()
                .map_err(prompt_error)?;
            Ok(choices.get(index).cloned().unwrap_or_default())
        }
        VariableKind::MultiSelect => {
            let choices = decl.choices().unwrap_or_default();
            let picked = MultiSelect::new()
                .with_prompt(prompt)
                .items(choices)
                .defaults(&preselected(choices, previous.or(decl.default())))
                .interact()
                .map_err(prompt_error)?;
            Ok(picked
                .into_iter()
                .filter_map(|i| choices.get(i).map(String::as_str))
                .collect::<Vec<_>>()
                .join(","))
        }
        VariableKind::String => {
            let mut input = Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(!decl.is_required());
            if let Some(initial) = previous.or(decl.default()) {
                input = input.with_initial_text(initial);
            }
            input.interact_text().map_err(prompt_error)
        }
    }
}

/// Which choices start ticked, from an `a,b` answer.
#[cfg_attr(not(feature = "interactive"), allow(dead_code))]
fn preselected(choices: &[String], answer: Option<&str>) -> Vec<bool> {
    let ticked: Vec<&str> = answer
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .collect();
    choices.iter().map(|c| ticked.contains(&c.as_str())).collect()
}

#[cfg(not(feature = "interactive"))]
fn ask(decl: &VariableDecl, _previous: Option<&str>) -> CliResult<String> {
    Err(crate::error::CliError::InvalidInput {
        message: format!("no answer for '{}' and prompting is disabled", decl.name()),
        source: None,
    })
}

#[cfg(feature = "interactive")]
fn prompt_error(err: dialoguer::Error) -> crate::error::CliError {
    crate::error::CliError::InvalidInput {
        message: format!("prompt failed: {err}"),
        source: Some(Box::new(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preselected_ticks_the_answered_items() {
        let choices: Vec<String> = ["3.6", "3.7", "3.8"].map(String::from).to_vec();
        assert_eq!(
            preselected(&choices, Some("3.8, 3.6")),
            [true, false, true]
        );
        assert_eq!(preselected(&choices, None), [false, false, false]);
    }
}
