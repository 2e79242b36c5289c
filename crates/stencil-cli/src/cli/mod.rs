//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use stencil_core::domain::ValidationMode;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Validate template answers, render a project and tidy the result",
    long_about = "Stencil checks the answers for a project template against the \
                  rules the template declares, renders the template, and then \
                  deletes or renames the parts of the rendered tree that the \
                  answers rule out.",
    after_help = "EXAMPLES:\n\
        \x20 stencil validate --answers answers.toml --strict\n\
        \x20 stencil generate templates/pyproject -o my-project --set project_name=my-project\n\
        \x20 stencil transform my-project --template templates/pyproject --dry-run\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check answers against a template's declared rules.
    #[command(
        about = "Validate answers without generating anything",
        after_help = "EXAMPLES:\n\
            \x20 stencil validate --set project_name=demo --set package_name=demo\n\
            \x20 stencil validate templates/pyproject --answers answers.json --strict"
    )]
    Validate(ValidateArgs),

    /// Render a template and apply its post-generation actions.
    #[command(
        visible_alias = "g",
        about = "Generate a project from a template",
        after_help = "EXAMPLES:\n\
            \x20 stencil generate templates/pyproject -o my-project --answers answers.toml\n\
            \x20 stencil generate -o my-project --set namespace=acme --yes\n\
            \x20 stencil generate templates/pyproject -o my-project --dry-run"
    )]
    Generate(GenerateArgs),

    /// Run only the post-generation phase on a rendered tree.
    #[command(
        about = "Transform an already rendered project",
        after_help = "EXAMPLES:\n\
            \x20 stencil transform my-project --template templates/pyproject --answers answers.toml\n\
            \x20 stencil transform my-project --dry-run --answers answers.toml"
    )]
    Transform(TransformArgs),

    /// List the variables a template declares.
    #[command(
        visible_alias = "vars",
        about = "List declared variables and their rules",
        after_help = "EXAMPLES:\n\
            \x20 stencil variables\n\
            \x20 stencil variables templates/pyproject --output-format json"
    )]
    Variables(VariablesArgs),

    /// Initialise a Stencil configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stencil init            # default location\n\
            \x20 stencil init --force    # overwrite an existing file\n\
            \x20 stencil -c ./stencil.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Stencil configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stencil config get validation.strict\n\
            \x20 stencil config list\n\
            \x20 stencil config path"
    )]
    Config(ConfigCommands),
}

// ── shared answer flags ───────────────────────────────────────────────────────

/// Where answers come from and how strictly they are checked.
#[derive(Debug, Args)]
pub struct AnswerArgs {
    /// Answers file (`.toml` or `.json`).
    #[arg(
        short = 'a',
        long = "answers",
        value_name = "FILE",
        help = "Read answers from a TOML or JSON file"
    )]
    pub answers: Option<PathBuf>,

    /// Individual answers; applied after the answers file.
    #[arg(
        short = 's',
        long = "set",
        value_name = "NAME=VALUE",
        help = "Set one answer (repeatable)"
    )]
    pub set: Vec<String>,

    /// Reject answers for undeclared variables.
    #[arg(long = "strict", conflicts_with = "lenient", help = "Reject unknown answers")]
    pub strict: bool,

    /// Ignore answers for undeclared variables.
    #[arg(long = "lenient", help = "Ignore unknown answers (default)")]
    pub lenient: bool,
}

impl AnswerArgs {
    /// Mode from the flags, falling back to the configured default.
    pub fn mode(&self, strict_by_default: bool) -> ValidationMode {
        if self.strict {
            ValidationMode::Strict
        } else if self.lenient {
            ValidationMode::Lenient
        } else {
            ValidationMode::from_strict(strict_by_default)
        }
    }
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `stencil validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Template directory; the built-in template when omitted.
    #[arg(value_name = "TEMPLATE_DIR", help = "Template directory")]
    pub template: Option<PathBuf>,

    #[command(flatten)]
    pub answers: AnswerArgs,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `stencil generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Template directory; the built-in template when omitted.
    #[arg(value_name = "TEMPLATE_DIR", help = "Template directory")]
    pub template: Option<PathBuf>,

    /// Directory the project is generated into.  Must not exist yet.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory"
    )]
    pub output: PathBuf,

    #[command(flatten)]
    pub answers: AnswerArgs,

    /// Skip prompts and the confirmation.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Never prompt; use defaults for anything unanswered"
    )]
    pub yes: bool,

    /// Replace an existing output directory (destructive).
    #[arg(long = "force", help = "Overwrite existing directory")]
    pub force: bool,

    /// Show the files and actions without writing anything.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── transform ─────────────────────────────────────────────────────────────────

/// Arguments for `stencil transform`.
#[derive(Debug, Args)]
pub struct TransformArgs {
    /// Root of the rendered project.
    #[arg(value_name = "RENDERED_DIR", help = "Rendered project directory")]
    pub rendered: PathBuf,

    /// Template the project was rendered from; the built-in one when omitted.
    #[arg(
        short = 't',
        long = "template",
        value_name = "TEMPLATE_DIR",
        help = "Template directory"
    )]
    pub template: Option<PathBuf>,

    #[command(flatten)]
    pub answers: AnswerArgs,

    /// Print the decisions without touching the tree.
    #[arg(long = "dry-run", help = "Print the plan without applying it")]
    pub dry_run: bool,
}

// ── variables ─────────────────────────────────────────────────────────────────

/// Arguments for `stencil variables`.
#[derive(Debug, Args)]
pub struct VariablesArgs {
    /// Template directory; the built-in template when omitted.
    #[arg(value_name = "TEMPLATE_DIR", help = "Template directory")]
    pub template: Option<PathBuf>,

    /// Also list the post-generation actions.
    #[arg(long = "actions", help = "Include post-generation actions")]
    pub actions: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stencil config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `validation.strict`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
