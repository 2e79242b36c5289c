//! `stencil transform`: apply a template's post-generation actions to a tree
//! that was rendered earlier, possibly by another tool.

use serde_json::json;
use tracing::{info, instrument};

use stencil_adapters::{LocalFilesystem, StrictRenderer};
use stencil_core::{
    application::{GenerateService, TransformPreview, TransformReport},
    error::StencilError,
};

use crate::{
    cli::TransformArgs,
    commands::{collect_answers, load_template},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(root = %args.rendered.display()))]
pub fn execute(args: TransformArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let template = load_template(args.template.as_deref(), &config)?;
    let answers = collect_answers(&args.answers)?;
    let mode = args.answers.mode(config.validation.strict);
    let configuration = template
        .validate_answers(&answers, mode)
        .map_err(StencilError::from)?;

    let service = GenerateService::new(Box::new(StrictRenderer::new()), Box::new(LocalFilesystem));

    if args.dry_run {
        let preview = service.preview(&template, &args.rendered, &configuration)?;
        return show_preview(&preview, &output);
    }

    let report = service.transform(&template, &args.rendered, &configuration)?;
    info!(
        deleted = report.deleted(),
        renamed = report.renamed(),
        rendered = report.rendered(),
        "transform finished"
    );
    show_report(&report, &output)
}

fn show_preview(preview: &TransformPreview, output: &OutputManager) -> CliResult<()> {
    let warnings: Vec<String> = preview.warnings.iter().map(ToString::to_string).collect();

    if output.is_json() {
        let decisions: Vec<_> = preview
            .decisions
            .iter()
            .map(|(path, action)| json!({ "path": path.to_string(), "action": action.to_string() }))
            .collect();
        return output.json(&json!({ "decisions": decisions, "warnings": warnings }));
    }

    if preview.decisions.is_empty() {
        output.info("Dry run: nothing to change")?;
    } else {
        output.info("Dry run: would apply")?;
        for (path, action) in &preview.decisions {
            output.print(&format!("  {:<24} {path}", action.to_string()))?;
        }
    }
    for warning in &warnings {
        output.warning(warning)?;
    }
    Ok(())
}

fn show_report(report: &TransformReport, output: &OutputManager) -> CliResult<()> {
    let applied: Vec<String> = report.applied.iter().map(ToString::to_string).collect();
    let warnings: Vec<String> = report.warnings.iter().map(ToString::to_string).collect();

    if output.is_json() {
        return output.json(&json!({ "applied": applied, "warnings": warnings }));
    }

    for line in &applied {
        output.print(&format!("  {line}"))?;
    }
    for warning in &warnings {
        output.warning(warning)?;
    }
    output.success(&format!(
        "Transformed ({} deleted, {} renamed, {} rendered, {} warnings)",
        report.deleted(),
        report.renamed(),
        report.rendered(),
        warnings.len()
    ))?;
    Ok(())
}
