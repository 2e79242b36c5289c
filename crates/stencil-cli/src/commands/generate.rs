//! Implementation of the `stencil generate` command.
//!
//! Responsibility: gather answers (file, `--set`, prompts), call the core
//! generate service, and display results. No business logic lives here.

use serde_json::json;
use tracing::{debug, info, instrument};

use stencil_adapters::{LocalFilesystem, StrictRenderer};
use stencil_core::{
    application::{ApplicationError, GenerateOptions, GeneratePlan, GenerateReport, GenerateService},
    domain::{Configuration, RawAnswers, Template, ValidationMode},
    error::StencilError,
};

use crate::{
    cli::{GenerateArgs, GlobalArgs},
    commands::{collect_answers, load_template, validate::print_configuration},
    config::AppConfig,
    error::{CliError, CliResult},
    git,
    output::OutputManager,
    prompt,
};

/// Execute the `stencil generate` command.
///
/// Dispatch sequence:
/// 1. Load the template and refuse an existing output directory
/// 2. Collect answers, prompting for missing ones when interactive
/// 3. Validate, re-asking for a rejected answer when interactive
/// 4. Early-exit with the plan if `--dry-run`
/// 5. Render, write and transform via `GenerateService`
/// 6. `git init` when the configuration asks for it
#[instrument(skip_all, fields(output = %args.output.display()))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let template = load_template(args.template.as_deref(), &config)?;

    if args.output.exists() && !args.force {
        return Err(StencilError::from(ApplicationError::ProjectExists {
            path: args.output.clone(),
        })
        .into());
    }

    let interactive = !args.yes && !global.quiet && !output.is_json() && prompt::can_prompt();
    debug!(interactive, "answer collection");

    let mut answers = collect_answers(&args.answers)?;
    if interactive {
        prompt::fill_missing(&template, &mut answers)?;
    }

    let mode = args.answers.mode(config.validation.strict);
    let configuration = validate(&template, &mut answers, mode, interactive, &output)?;

    let service = GenerateService::new(Box::new(StrictRenderer::new()), Box::new(LocalFilesystem));
    let options = GenerateOptions::new(&args.output)
        .mode(mode)
        .force(args.force);

    if args.dry_run {
        let plan = service.plan(&template, &answers, &options)?;
        return show_plan(&plan, &output);
    }

    if interactive {
        output.header(&format!(
            "Generating '{}' into {}",
            template.name(),
            args.output.display()
        ))?;
        print_configuration(&configuration, &output)?;
        if !prompt::confirm("Continue?")? {
            return Err(CliError::Cancelled);
        }
    }

    info!(template = %template.name(), "generation started");
    let report = service.generate(&template, &answers, &options)?;

    let git_initialized = git::requested(&report.configuration);
    if git_initialized {
        git::initialize(&report.output, &report.configuration)?;
    }

    show_report(&report, git_initialized, &output)
}

/// Validate `answers`; when interactive, ask again for a rejected answer
/// until the whole set passes.
fn validate(
    template: &Template,
    answers: &mut RawAnswers,
    mode: ValidationMode,
    interactive: bool,
    output: &OutputManager,
) -> CliResult<Configuration> {
    loop {
        let err = match template.validate_answers(answers, mode) {
            Ok(configuration) => return Ok(configuration),
            Err(err) => err,
        };
        let decl = match template.schema.get(err.variable()) {
            Some(decl) if interactive && !decl.is_computed() => decl,
            _ => return Err(StencilError::from(err).into()),
        };
        output.warning(&err.to_string())?;
        let value = prompt::ask_again(decl, answers.get(decl.name()).map(String::as_str))?;
        answers.insert(decl.name().to_owned(), value);
    }
}

fn show_plan(plan: &GeneratePlan, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        let actions: Vec<_> = plan
            .actions
            .iter()
            .map(|(path, action)| json!({ "path": path.to_string(), "action": action.to_string() }))
            .collect();
        return output.json(&json!({
            "output": plan.structure.root().display().to_string(),
            "directories": plan.structure.directories().map(|d| d.path.to_string()).collect::<Vec<_>>(),
            "files": plan.structure.files().map(|f| f.path.to_string()).collect::<Vec<_>>(),
            "actions": actions,
        }));
    }

    output.info(&format!(
        "Dry run: would generate {}",
        plan.structure.root().display()
    ))?;
    output.header("Files")?;
    for file in plan.structure.files() {
        output.print(&format!("  {}", file.path))?;
    }
    if !plan.actions.is_empty() {
        output.header("Post-generation actions")?;
        for (path, action) in plan.actions.iter() {
            output.print(&format!("  {:<24} {path}", action.to_string()))?;
        }
    }
    Ok(())
}

fn show_report(report: &GenerateReport, git_initialized: bool, output: &OutputManager) -> CliResult<()> {
    let warnings: Vec<String> = report
        .transform
        .warnings
        .iter()
        .map(ToString::to_string)
        .collect();

    if output.is_json() {
        return output.json(&json!({
            "output": report.output.display().to_string(),
            "files_written": report.files_written,
            "directories_created": report.directories_created,
            "deleted": report.transform.deleted(),
            "renamed": report.transform.renamed(),
            "rendered": report.transform.rendered(),
            "warnings": warnings,
            "git_initialized": git_initialized,
        }));
    }

    for warning in &warnings {
        output.warning(warning)?;
    }
    output.success(&format!(
        "Generated {} ({} files, {} deleted, {} renamed, {} rendered)",
        report.output.display(),
        report.files_written,
        report.transform.deleted(),
        report.transform.renamed(),
        report.transform.rendered(),
    ))?;
    if git_initialized {
        output.info("Initialised a git repository")?;
    }
    Ok(())
}
