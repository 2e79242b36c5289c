//! `stencil validate`: run only the pre-generation check.
//!
//! Prints the resolved configuration on success. Nothing is rendered or
//! written.

use tracing::{info, instrument};

use stencil_core::{domain::Configuration, error::StencilError};

use crate::{
    cli::ValidateArgs,
    commands::{collect_answers, load_template},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: ValidateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let template = load_template(args.template.as_deref(), &config)?;
    let answers = collect_answers(&args.answers)?;
    let mode = args.answers.mode(config.validation.strict);

    let configuration = template
        .validate_answers(&answers, mode)
        .map_err(StencilError::from)?;
    info!(template = %template.name(), %mode, "answers are valid");

    if output.is_json() {
        return output.json(&configuration);
    }

    output.success(&format!(
        "{} answers are valid for '{}' ({mode})",
        configuration.len(),
        template.name()
    ))?;
    print_configuration(&configuration, &output)?;
    Ok(())
}

/// `name = value` lines, names aligned.
pub(crate) fn print_configuration(
    configuration: &Configuration,
    output: &OutputManager,
) -> CliResult<()> {
    let width = configuration.names().map(str::len).max().unwrap_or(0);
    for (name, value) in configuration.iter() {
        output.print(&format!("  {name:<width$} = {value}"))?;
    }
    Ok(())
}
