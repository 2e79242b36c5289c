//! `stencil variables`: list what a template asks for.

use serde::Serialize;

use stencil_core::domain::{Template, VariableDecl};

use crate::{
    cli::VariablesArgs,
    commands::load_template,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// One declared variable, as shown to the user.
#[derive(Debug, Serialize)]
struct VariableRow {
    name: String,
    kind: String,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<String>,
    rules: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    exempt: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    computed: Option<String>,
}

impl From<&VariableDecl> for VariableRow {
    fn from(decl: &VariableDecl) -> Self {
        Self {
            name: decl.name().to_owned(),
            kind: decl.kind().to_string(),
            required: decl.is_required(),
            default: decl.default().map(str::to_owned),
            rules: decl.rules().iter().map(ToString::to_string).collect(),
            exempt: decl.exemptions().to_vec(),
            description: decl.description().map(str::to_owned),
            computed: decl.expression().map(str::to_owned),
        }
    }
}

pub fn execute(args: VariablesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let template = load_template(args.template.as_deref(), &config)?;
    let rows: Vec<VariableRow> = template.schema.variables().map(VariableRow::from).collect();

    if output.is_json() {
        let actions: Vec<String> = if args.actions {
            template.actions.iter().map(ToString::to_string).collect()
        } else {
            Vec::new()
        };
        return output.json(&serde_json::json!({
            "template": template.name(),
            "version": template.metadata.version,
            "variables": rows,
            "actions": actions,
        }));
    }

    output.header(&format!(
        "{} {} ({} variables)",
        template.name(),
        template.metadata.version,
        rows.len()
    ))?;
    if !template.metadata.description.is_empty() {
        output.print(&template.metadata.description)?;
    }
    output.print("")?;
    for row in &rows {
        output.print(&describe(row))?;
    }

    if args.actions {
        print_actions(&template, &output)?;
    }
    Ok(())
}

fn describe(row: &VariableRow) -> String {
    let mut line = format!("  {:<20} {:<11}", row.name, row.kind);
    if let Some(expression) = &row.computed {
        line.push_str(&format!(" = {expression}"));
        return line;
    }
    let rules = row
        .rules
        .iter()
        .filter(|r| *r != "required")
        .cloned()
        .collect::<Vec<_>>();
    if row.required {
        line.push_str(" required");
    }
    if !rules.is_empty() {
        line.push_str(&format!(" {}", rules.join(", ")));
    }
    if let Some(default) = &row.default {
        line.push_str(&format!(" [default: {default}]"));
    }
    if !row.exempt.is_empty() {
        line.push_str(&format!(" [exempt: {}]", row.exempt.join(", ")));
    }
    if let Some(description) = &row.description {
        line.push_str(&format!("  # {description}"));
    }
    line
}

fn print_actions(template: &Template, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.header(&format!("Post-generation actions ({})", template.actions.len()))?;
    for rule in &template.actions {
        output.print(&format!("  {rule}"))?;
    }
    Ok(())
}
