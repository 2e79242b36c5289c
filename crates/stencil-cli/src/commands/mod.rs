//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into calls on the core services and
//! print the results. The helpers below are shared by the commands that take
//! a template and answers.

use std::path::Path;

use tracing::debug;

use stencil_adapters::{FilesystemTemplateLoader, builtin_templates, load_answers, parse_assignment};
use stencil_core::domain::{RawAnswers, Template};

use crate::{cli::AnswerArgs, config::AppConfig, error::CliResult};

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod transform;
pub mod validate;
pub mod variables;

/// The template in `dir`, else `templates.default_dir`, else the built-in one.
pub(crate) fn load_template(dir: Option<&Path>, config: &AppConfig) -> CliResult<Template> {
    let dir = dir.or(config.templates.default_dir.as_deref());
    let template = match dir {
        Some(dir) => FilesystemTemplateLoader::new(dir).load()?,
        None => {
            debug!("no template directory given, using the built-in template");
            builtin_templates::pyproject()
                .map_err(stencil_core::error::StencilError::from)?
        }
    };
    Ok(template)
}

/// Answers from the answers file, then every `--set`, later ones winning.
pub(crate) fn collect_answers(args: &AnswerArgs) -> CliResult<RawAnswers> {
    let mut answers = match &args.answers {
        Some(path) => load_answers(path)?,
        None => RawAnswers::new(),
    };
    for assignment in &args.set {
        let (name, value) = parse_assignment(assignment)?;
        answers.insert(name, value);
    }
    debug!(count = answers.len(), "answers collected");
    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn answer_args(file: Option<PathBuf>, set: &[&str]) -> AnswerArgs {
        AnswerArgs {
            answers: file,
            set: set.iter().map(|s| (*s).to_owned()).collect(),
            strict: false,
            lenient: false,
        }
    }

    #[test]
    fn set_overrides_the_answers_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("answers.toml");
        std::fs::write(&file, "namespace = \"acme\"\nlicense = \"MIT\"\n").unwrap();

        let answers =
            collect_answers(&answer_args(Some(file), &["namespace=.remove.me"])).unwrap();
        assert_eq!(answers.get("namespace").map(String::as_str), Some(".remove.me"));
        assert_eq!(answers.get("license").map(String::as_str), Some("MIT"));
    }

    #[test]
    fn malformed_set_is_rejected() {
        assert!(collect_answers(&answer_args(None, &["namespace"])).is_err());
    }

    #[test]
    fn builtin_template_is_the_fallback() {
        let template = load_template(None, &AppConfig::default()).unwrap();
        assert_eq!(template.name(), builtin_templates::PYPROJECT);
    }

    #[test]
    fn configured_default_dir_is_used() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.templates.default_dir = Some(dir.path().join("missing"));
        assert!(load_template(None, &config).is_err());
    }
}
