//! `git init` for freshly generated projects.
//!
//! Runs when the configuration says `initialize_git = true`. The author
//! identity of the new repository is taken from `github_user` and
//! `github_email` when those are answered.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info, instrument};

use stencil_core::domain::{Configuration, Value};

use crate::error::{CliError, CliResult};

/// Variable that switches repository initialisation on.
pub const INITIALIZE_GIT: &str = "initialize_git";

/// `true` if the configuration asks for a repository.
pub fn requested(configuration: &Configuration) -> bool {
    configuration
        .get(INITIALIZE_GIT)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Create a repository in `root` and set its local identity.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn initialize(root: &Path, configuration: &Configuration) -> CliResult<()> {
    run(root, &["init", "--quiet"])?;

    let identity = [("user.name", "github_user"), ("user.email", "github_email")];
    for (key, variable) in identity {
        if let Some(value) = configuration.text(variable).filter(|v| !v.is_empty()) {
            run(root, &["config", key, value])?;
        }
    }

    info!("initialised git repository");
    Ok(())
}

fn run(dir: &Path, args: &[&str]) -> CliResult<()> {
    let command = format!("git {}", args.join(" "));
    debug!(%command, "running");

    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| CliError::ExternalCommandFailed {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(CliError::ExternalCommandFailed {
            command,
            reason: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }
    Ok(())
}
