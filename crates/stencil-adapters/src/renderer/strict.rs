//! Strict placeholder renderer.
//!
//! Every `{{ name }}` in a file path or a text file must resolve against the
//! configuration; the first one that does not aborts the render with
//! [`RenderError::UndefinedVariable`], and a double-brace expression that is
//! not a bare name aborts it with [`RenderError::UnsupportedExpression`].
//! Files ending in `.j2` keep their content as is; the transformer renders
//! them with Jinja once the tree has its final shape. Rendering happens
//! entirely in memory, so a failed render writes nothing.

use std::path::Path;

use stencil_core::{
    application::ports::TemplateRenderer,
    domain::{
        Configuration, PlaceholderError, ProjectStructure, RelativePath, RenderError, Template,
        TemplateContent, TemplateNode, jinja,
    },
    error::StencilResult,
};
use tracing::{debug, instrument};

/// Renderer that refuses to guess: undefined placeholders are errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictRenderer;

impl StrictRenderer {
    /// Create a new strict renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for StrictRenderer {
    #[instrument(skip_all, fields(template = %template.name()))]
    fn render(
        &self,
        template: &Template,
        config: &Configuration,
        output_root: &Path,
    ) -> StencilResult<ProjectStructure> {
        let mut structure = ProjectStructure::new(output_root);

        for node in &template.tree.nodes {
            let path = render_path(node.path(), config)?;
            match node {
                TemplateNode::File(spec) => {
                    let content = render_content(&spec.content, &spec.path, config)?;
                    structure.add_file(path, content);
                }
                TemplateNode::Directory(_) => structure.add_directory(path),
            }
        }

        debug!(entries = structure.entry_count(), "template rendered");
        Ok(structure)
    }
}

fn render_path(raw: &str, config: &Configuration) -> Result<RelativePath, RenderError> {
    let rendered = config
        .interpolate(raw)
        .map_err(|e| placeholder_error(e, raw))?;
    RelativePath::try_new(&rendered).map_err(|e| e.into_render(&rendered))
}

fn render_content(
    content: &TemplateContent,
    raw_path: &str,
    config: &Configuration,
) -> Result<Vec<u8>, RenderError> {
    match content {
        TemplateContent::Text(source) if jinja::is_deferred(raw_path) => {
            Ok(source.as_str().as_bytes().to_vec())
        }
        TemplateContent::Text(source) => config
            .interpolate(source.as_str())
            .map(String::into_bytes)
            .map_err(|e| placeholder_error(e, raw_path)),
        TemplateContent::Binary(bytes) => Ok(bytes.clone()),
    }
}

fn placeholder_error(err: PlaceholderError, path: &str) -> RenderError {
    match err {
        PlaceholderError::Undefined(undefined) => RenderError::UndefinedVariable {
            variable: undefined.0,
            path: path.to_owned(),
        },
        PlaceholderError::Unsupported(expression) => RenderError::UnsupportedExpression {
            expression,
            path: path.to_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stencil_core::{
        domain::{DirectorySpec, FileSpec, FsEntry, TemplateMetadata, ValidationMode, VariableDecl},
        error::StencilError,
    };

    fn template(nodes: Vec<TemplateNode>) -> Template {
        nodes
            .into_iter()
            .fold(Template::builder(), |b, n| b.add_node(n))
            .metadata(TemplateMetadata::new("t"))
            .variable(VariableDecl::string("package_name").required())
            .build()
            .unwrap()
    }

    fn config(template: &Template, package: &str) -> Configuration {
        let raw = [("package_name".to_owned(), package.to_owned())]
            .into_iter()
            .collect();
        template
            .validate_answers(&raw, ValidationMode::Strict)
            .unwrap()
    }

    fn file_content<'a>(structure: &'a ProjectStructure, path: &str) -> &'a [u8] {
        structure
            .files()
            .find(|f| f.path.as_path() == Path::new(path))
            .map(|f| f.content.as_slice())
            .unwrap_or_else(|| panic!("{path} not rendered"))
    }

    #[test]
    fn substitutes_paths_and_contents() {
        let t = template(vec![
            TemplateNode::Directory(DirectorySpec::new("src/{{ package_name }}")),
            TemplateNode::File(FileSpec::text(
                "src/{{ package_name }}/__init__.py",
                "\"\"\"{{ cookiecutter.package_name }}\"\"\"\n",
            )),
        ]);
        let structure = StrictRenderer
            .render(&t, &config(&t, "tools"), Path::new("/out"))
            .unwrap();

        assert!(matches!(
            &structure.entries()[0],
            FsEntry::Directory(d) if d.path.as_path() == Path::new("src/tools")
        ));
        assert_eq!(
            file_content(&structure, "src/tools/__init__.py"),
            b"\"\"\"tools\"\"\"\n"
        );
    }

    #[test]
    fn undefined_placeholder_fails_naming_variable_and_file() {
        let t = template(vec![TemplateNode::File(FileSpec::text(
            "README.md",
            "# {{ project_name }}",
        ))]);
        let err = StrictRenderer
            .render(&t, &config(&t, "tools"), Path::new("/out"))
            .unwrap_err();

        match err {
            StencilError::Render(RenderError::UndefinedVariable { variable, path }) => {
                assert_eq!(variable, "project_name");
                assert_eq!(path, "README.md");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn answer_that_escapes_root_is_an_invalid_path() {
        let t = template(vec![TemplateNode::File(FileSpec::text(
            "{{ package_name }}/x.txt",
            "",
        ))]);
        // Built by hand: the schema has no pattern, so `..` validates.
        let err = StrictRenderer
            .render(&t, &config(&t, "../.."), Path::new("/out"))
            .unwrap_err();
        assert!(matches!(
            err,
            StencilError::Render(RenderError::InvalidPath { .. })
        ));
    }

    #[test]
    fn binary_content_is_copied_verbatim() {
        let bytes = vec![0xff, 0x00, b'{', b'{', 0xfe];
        let t = template(vec![TemplateNode::File(FileSpec::new(
            "logo.bin",
            TemplateContent::Binary(bytes.clone()),
        ))]);
        let structure = StrictRenderer
            .render(&t, &config(&t, "tools"), Path::new("/out"))
            .unwrap();
        assert_eq!(file_content(&structure, "logo.bin"), bytes.as_slice());
    }

    #[test]
    fn workflow_expressions_pass_through() {
        let t = template(vec![TemplateNode::File(FileSpec::text(
            ".github/workflows/ci.yml",
            "python-version: ${{ matrix.python-version }}\n",
        ))]);
        let structure = StrictRenderer
            .render(&t, &config(&t, "tools"), Path::new("/out"))
            .unwrap();
        assert_eq!(
            file_content(&structure, ".github/workflows/ci.yml"),
            b"python-version: ${{ matrix.python-version }}\n"
        );
    }

    #[test]
    fn filter_expression_is_rejected_not_copied() {
        let t = template(vec![TemplateNode::File(FileSpec::text(
            "setup.cfg",
            "name = {{ package_name | upper }}\n",
        ))]);
        let err = StrictRenderer
            .render(&t, &config(&t, "tools"), Path::new("/out"))
            .unwrap_err();

        match err {
            StencilError::Render(RenderError::UnsupportedExpression { expression, path }) => {
                assert_eq!(expression, "{{ package_name | upper }}");
                assert_eq!(path, "setup.cfg");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn deferred_files_keep_their_source_but_get_a_rendered_path() {
        let source = "name = {{ package_name|upper }}\n{% if true %}x{% endif %}\n";
        let t = template(vec![TemplateNode::File(FileSpec::text(
            "{{ package_name }}/setup.cfg.j2",
            source,
        ))]);
        let structure = StrictRenderer
            .render(&t, &config(&t, "tools"), Path::new("/out"))
            .unwrap();
        assert_eq!(
            file_content(&structure, "tools/setup.cfg.j2"),
            source.as_bytes()
        );
    }
}
