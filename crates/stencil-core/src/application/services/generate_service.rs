//! Generate Service - main application orchestrator.
//!
//! This service coordinates the whole generation run:
//! 1. Validate raw answers into a `Configuration` (pre-generation)
//! 2. Render the template into memory
//! 3. Write to filesystem (rolled back on failure)
//! 4. Transform the written tree (post-generation)
//!
//! Nothing is written before steps 1 and 2 have succeeded.

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer},
        services::transformer::{TransformPreview, TransformReport, Transformer},
    },
    domain::{
        ActionPlan, Configuration, FsEntry, ProjectStructure, RawAnswers, Template, ValidationMode,
    },
    error::StencilResult,
};

/// Options for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub output: PathBuf,
    pub mode: ValidationMode,
    /// Replace an existing output directory.
    pub force: bool,
}

impl GenerateOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            mode: ValidationMode::default(),
            force: false,
        }
    }

    pub fn mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub configuration: Configuration,
    pub files_written: usize,
    pub directories_created: usize,
    pub transform: TransformReport,
}

/// What a run would do, computed without writing anything.
#[derive(Debug, Clone)]
pub struct GeneratePlan {
    pub configuration: Configuration,
    pub structure: ProjectStructure,
    pub actions: ActionPlan,
}

/// Main generation service.
pub struct GenerateService {
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl GenerateService {
    /// Create a new generate service with the given adapters.
    pub fn new(renderer: Box<dyn TemplateRenderer>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            renderer,
            filesystem,
        }
    }

    /// Generate a project from `template` into `options.output`.
    #[instrument(
        skip_all,
        fields(
            template = %template.name(),
            output = %options.output.display(),
            mode = %options.mode
        )
    )]
    pub fn generate(
        &self,
        template: &Template,
        answers: &RawAnswers,
        options: &GenerateOptions,
    ) -> StencilResult<GenerateReport> {
        let plan = self.plan(template, answers, options)?;
        info!(
            files = plan.structure.files().count(),
            actions = plan.actions.len(),
            "Template rendered"
        );

        self.write_structure(&plan.structure, options.force)?;

        // The tree stays in place from here on, even if the transform fails.
        let transform = self.transform(template, &options.output, &plan.configuration)?;

        info!("Generation completed successfully");
        Ok(GenerateReport {
            output: options.output.clone(),
            files_written: plan.structure.files().count(),
            directories_created: plan.structure.directories().count(),
            configuration: plan.configuration,
            transform,
        })
    }

    /// Validate, compile the action plan and render into memory.
    ///
    /// Used directly for `--dry-run`; nothing touches the filesystem.
    pub fn plan(
        &self,
        template: &Template,
        answers: &RawAnswers,
        options: &GenerateOptions,
    ) -> StencilResult<GeneratePlan> {
        let configuration = template.validate_answers(answers, options.mode)?;
        let actions = template.plan(&configuration)?;
        let structure = self
            .renderer
            .render(template, &configuration, &options.output)?;
        structure.validate()?;
        Ok(GeneratePlan {
            configuration,
            structure,
            actions,
        })
    }

    /// Run only the post-generation phase on an already rendered tree.
    pub fn transform(
        &self,
        template: &Template,
        root: &Path,
        config: &Configuration,
    ) -> StencilResult<TransformReport> {
        Transformer::new(self.filesystem.as_ref(), &template.actions).transform(root, config)
    }

    /// Walk and decide without modifying the tree.
    pub fn preview(
        &self,
        template: &Template,
        root: &Path,
        config: &Configuration,
    ) -> StencilResult<TransformPreview> {
        Transformer::new(self.filesystem.as_ref(), &template.actions).preview(root, config)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Write project structure to filesystem with rollback on failure.
    fn write_structure(&self, structure: &ProjectStructure, force: bool) -> StencilResult<()> {
        if self.filesystem.exists(structure.root()) {
            if !force {
                return Err(ApplicationError::ProjectExists {
                    path: structure.root().to_path_buf(),
                }
                .into());
            }
            warn!(path = %structure.root().display(), "Replacing existing output directory");
            self.filesystem.remove_dir_all(structure.root())?;
        }

        match self.write_all(structure) {
            Ok(()) => {
                info!("Successfully wrote all files");
                Ok(())
            }
            Err(e) => {
                warn!("Write failed, attempting rollback");
                self.rollback(structure.root());
                Err(e)
            }
        }
    }

    fn write_all(&self, structure: &ProjectStructure) -> StencilResult<()> {
        let root = structure.root();
        self.filesystem.create_dir_all(root)?;

        for entry in structure.entries() {
            match entry {
                FsEntry::Directory(dir) => {
                    self.filesystem.create_dir_all(&dir.path.under(root))?;
                }
                FsEntry::File(file) => {
                    let path = file.path.under(root);
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }
                    self.filesystem.write_file(&path, &file.content)?;
                }
            }
        }
        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}
