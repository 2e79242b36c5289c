//! End-to-end generation with the real adapters: validate, render, write,
//! transform, on disk and in memory.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use pretty_assertions::assert_eq;
use stencil_adapters::{
    LocalFilesystem, MemoryFilesystem, StrictRenderer, builtin_templates, load_answers,
};
use stencil_core::{
    application::{GenerateOptions, GenerateService, TransformWarning, Transformer},
    domain::{
        ActionRule, Condition, FileSpec, RelativePath, Template, TemplateMetadata, TemplateNode,
        TemplateTree, TransformError, ValidationError, VariableDecl,
    },
    error::StencilError,
    prelude::{Filesystem, RawAnswers, ValidationMode},
};
use tempfile::TempDir;
use walkdir::WalkDir;

fn answers(overrides: &[(&str, &str)]) -> RawAnswers {
    let mut raw: RawAnswers = [
        ("project_name", "tools"),
        ("package_name", "tools"),
        ("author_full_name", "Ada Lovelace"),
        ("author_email", "ada AT example.org"),
        ("github_user", "ada"),
        ("github_email", "ada@example.org"),
        ("copyright_holder", "Ada Lovelace"),
        ("team_name", "Analytical Engines"),
        ("team_email", "team@example.org"),
        ("project_description", "Tools for engines"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect();
    for (k, v) in overrides {
        raw.insert((*k).to_owned(), (*v).to_owned());
    }
    raw
}

fn local_service() -> GenerateService {
    GenerateService::new(Box::new(StrictRenderer), Box::new(LocalFilesystem))
}

/// Every path below `root` with its content (`None` for directories).
fn snapshot(root: &Path) -> BTreeMap<String, Option<Vec<u8>>> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap())
        .map(|e| {
            let rel = e
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            let content = e.file_type().is_file().then(|| fs::read(e.path()).unwrap());
            (rel, content)
        })
        .collect()
}

fn generate(dir: &TempDir, name: &str, raw: &RawAnswers) -> PathBuf {
    let out = dir.path().join(name);
    local_service()
        .generate(
            &builtin_templates::pyproject().unwrap(),
            raw,
            &GenerateOptions::new(&out).mode(ValidationMode::Strict),
        )
        .unwrap();
    out
}

#[test]
fn sentinel_namespace_keeps_the_flat_layout() {
    let dir = TempDir::new().unwrap();
    let out = generate(&dir, "out", &answers(&[("namespace", ".remove.me")]));

    assert!(!out.join("src/__namespace__").exists());
    assert!(out.join("src/tools/__init__.py").is_file());
    assert!(out.join("src/tools/version.py").is_file());
    // project_type defaults to package: no entry point modules.
    assert!(!out.join("src/tools/main.py").exists());
    assert!(!out.join("src/tools/__main__.py").exists());
    assert!(!out.join("src/tools/plugin.py").exists());

    assert!(out.join("LICENSES/MIT.txt").is_file());
    assert!(!out.join("LICENSES/Apache-2.0.txt").exists());
    assert!(!out.join("LICENSES/GPL-3.0-only.txt").exists());
}

#[test]
fn real_namespace_is_renamed_and_keeps_nested_files() {
    let dir = TempDir::new().unwrap();
    let out = generate(
        &dir,
        "out",
        &answers(&[("namespace", "acme"), ("license", "Apache-2.0")]),
    );

    assert!(!out.join("src/__namespace__").exists());
    assert!(!out.join("src/tools").exists());
    assert!(out.join("src/acme/tools/__init__.py").is_file());
    assert!(out.join("LICENSES/Apache-2.0.txt").is_file());
    assert!(!out.join("LICENSES/MIT.txt").exists());
}

#[test]
fn console_app_renames_the_entry_point_inside_the_renamed_namespace() {
    let dir = TempDir::new().unwrap();
    let out = generate(
        &dir,
        "out",
        &answers(&[
            ("namespace", "acme"),
            ("project_type", "console-app"),
            ("entry_point_source", "cli"),
        ]),
    );

    let package = out.join("src/acme/tools");
    assert!(package.join("cli.py").is_file());
    assert!(!package.join("main.py").exists());
    assert!(!package.join("plugin.py").exists());
    assert_eq!(
        fs::read_to_string(package.join("__main__.py")).unwrap(),
        "from .cli import main\n\nif __name__ == \"__main__\":\n    main()\n"
    );
}

#[test]
fn answers_are_substituted_and_ci_expressions_survive() {
    let dir = TempDir::new().unwrap();
    let out = generate(&dir, "out", &answers(&[]));

    let pyproject = fs::read_to_string(out.join("pyproject.toml")).unwrap();
    assert!(pyproject.contains("name = \"tools\""));
    // " AT " is de-obfuscated before rendering.
    assert!(pyproject.contains("email = \"ada@example.org\""));

    let ci = fs::read_to_string(out.join(".github/workflows/ci.yml")).unwrap();
    assert!(ci.contains("${{ matrix.python-version }}"));
    assert!(ci.contains("[\"3.6\", \"3.7\", \"3.8\", \"3.9\"]"));
}

#[test]
fn deferred_files_are_rendered_and_their_sources_removed() {
    let dir = TempDir::new().unwrap();
    let out = generate(
        &dir,
        "out",
        &answers(&[
            ("python_versions", "3.9, 3.7"),
            ("project_type", "console-app"),
            ("entry_point_name", "tools-cli"),
        ]),
    );

    let leftovers: Vec<_> = snapshot(&out)
        .into_keys()
        .filter(|p| p.ends_with(".j2"))
        .collect();
    assert!(leftovers.is_empty(), "{leftovers:?}");

    assert_eq!(
        fs::read_to_string(out.join("tox.ini"))
            .unwrap()
            .lines()
            .nth(1),
        Some("envlist = py{37,39}")
    );
    let pyproject = fs::read_to_string(out.join("pyproject.toml")).unwrap();
    assert!(pyproject.contains("requires-python = \">=3.7\""));
    assert!(pyproject.contains("    \"Programming Language :: Python :: 3.9\",\n]"));

    let setup_cfg = fs::read_to_string(out.join("setup.cfg")).unwrap();
    assert!(
        setup_cfg.ends_with("[options.entry_points]\nconsole_scripts =\n    tools-cli = tools.main:main\n"),
        "{setup_cfg}"
    );

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(out.join("setup.py")).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}

#[test]
fn package_projects_have_no_entry_points_section() {
    let dir = TempDir::new().unwrap();
    let out = generate(&dir, "out", &answers(&[("namespace", "acme")]));

    let setup_cfg = fs::read_to_string(out.join("setup.cfg")).unwrap();
    assert!(!setup_cfg.contains("entry_points"), "{setup_cfg}");
    assert!(setup_cfg.contains("version = attr: acme.tools.version.__version__"));
    assert!(setup_cfg.contains("packages = find_namespace:"));
}

#[test]
fn blank_answers_fall_back_to_their_defaults() {
    let dir = TempDir::new().unwrap();
    let out = generate(
        &dir,
        "out",
        &answers(&[
            ("namespace", ""),
            ("project_type", "console-app"),
            ("entry_point_source", ""),
            ("python_versions", ""),
        ]),
    );

    assert!(!out.join("src/__namespace__").exists());
    assert!(out.join("src/tools/main.py").is_file());
    assert_eq!(
        fs::read_to_string(out.join("src/tools/__main__.py")).unwrap(),
        "from .main import main\n\nif __name__ == \"__main__\":\n    main()\n"
    );
    assert!(
        fs::read_to_string(out.join("tox.ini"))
            .unwrap()
            .contains("envlist = py{36,37,38,39}")
    );
}

#[test]
fn filter_expression_outside_deferred_files_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let template = Template::builder()
        .metadata(TemplateMetadata::new("filters"))
        .variable(VariableDecl::string("name").default_value("tools"))
        .tree(TemplateTree::new().with_node(TemplateNode::File(FileSpec::text(
            "README.md",
            "# {{ name|title }}\n",
        ))))
        .build()
        .unwrap();

    let err = local_service()
        .generate(&template, &RawAnswers::new(), &GenerateOptions::new(&out))
        .unwrap_err();

    assert!(err.to_string().contains("unsupported expression"), "{err}");
    assert!(!out.exists());
}

#[test]
fn two_fresh_renders_are_byte_identical() {
    let dir = TempDir::new().unwrap();
    let raw = answers(&[("namespace", "acme"), ("project_type", "plugin")]);
    let first = generate(&dir, "first", &raw);
    let second = generate(&dir, "second", &raw);

    assert_eq!(snapshot(&first), snapshot(&second));
}

#[test]
fn missing_project_name_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let mut raw = answers(&[]);
    raw.shift_remove("project_name");

    let err = local_service()
        .generate(
            &builtin_templates::pyproject().unwrap(),
            &raw,
            &GenerateOptions::new(&out),
        )
        .unwrap_err();

    assert_eq!(err.variable(), Some("project_name"));
    assert!(!out.exists());
}

#[test]
fn traversal_in_namespace_never_leaves_the_root() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    let err = local_service()
        .generate(
            &builtin_templates::pyproject().unwrap(),
            &answers(&[("namespace", "../../escape")]),
            &GenerateOptions::new(&out),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        StencilError::Validation(ValidationError::PatternMismatch { ref variable, .. })
            if variable == "namespace"
    ));
    assert!(!out.exists());
    assert!(!dir.path().join("escape").exists());
}

#[test]
fn existing_output_is_refused_and_left_alone() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();
    fs::write(out.join("keep.txt"), "mine").unwrap();

    let err = local_service()
        .generate(
            &builtin_templates::pyproject().unwrap(),
            &answers(&[]),
            &GenerateOptions::new(&out),
        )
        .unwrap_err();

    assert!(err.to_string().contains("already exists"), "{err}");
    assert_eq!(fs::read_to_string(out.join("keep.txt")).unwrap(), "mine");
}

#[test]
fn answers_file_drives_a_generation() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("answers.toml");
    let mut content = String::from("[cookiecutter]\n");
    for (k, v) in answers(&[("initialize_git", "no")]) {
        content.push_str(&format!("{k} = \"{v}\"\n"));
    }
    fs::write(&file, content).unwrap();

    let raw = load_answers(&file).unwrap();
    let out = generate(&dir, "out", &raw);
    assert!(out.join("README.md").is_file());
}

// ── In-memory transformer runs ───────────────────────────────────────────────

fn memory_template() -> Template {
    Template::builder()
        .metadata(TemplateMetadata::new("mem"))
        .variable(VariableDecl::boolean("with_docs"))
        .variable(VariableDecl::string("name").default_value("renamed"))
        .action(ActionRule::remove("docs").when(Condition::IsFalse("with_docs".into())))
        .action(ActionRule::remove("docs/api/index.md"))
        .action(ActionRule::remove("CHANGELOG.md"))
        .action(ActionRule::rename("pkg", "{{ name }}"))
        .build()
        .unwrap()
}

#[test]
fn partial_render_only_produces_warnings() {
    let fs = MemoryFilesystem::new()
        .with_file("/out/docs/index.md", "docs")
        .with_file("/out/pkg/__init__.py", "");
    let template = memory_template();
    let config = template
        .validate_answers(&RawAnswers::new(), ValidationMode::Strict)
        .unwrap();

    let report = Transformer::new(&fs, &template.actions)
        .transform(Path::new("/out"), &config)
        .unwrap();

    assert_eq!(
        report.warnings,
        vec![TransformWarning::MissingDeleteTarget(
            RelativePath::try_new("CHANGELOG.md").unwrap()
        )]
    );
    assert!(!fs.exists(Path::new("/out/docs")));
    assert!(fs.exists(Path::new("/out/renamed/__init__.py")));
}

#[test]
fn transform_twice_is_a_no_op_the_second_time() {
    let fs = MemoryFilesystem::new()
        .with_file("/out/docs/index.md", "docs")
        .with_file("/out/pkg/__init__.py", "")
        .with_file("/out/README.md", "readme");
    let template = memory_template();
    let config = template
        .validate_answers(&RawAnswers::new(), ValidationMode::Strict)
        .unwrap();
    let transformer = Transformer::new(&fs, &template.actions);

    transformer.transform(Path::new("/out"), &config).unwrap();
    let after_first = fs.snapshot(Path::new("/out"));
    let second = transformer.transform(Path::new("/out"), &config).unwrap();

    assert!(second.applied.is_empty());
    assert_eq!(fs.snapshot(Path::new("/out")), after_first);
}

#[test]
fn render_in_memory_marks_the_output_executable() {
    let fs = MemoryFilesystem::new().with_file("/out/pkg/run.py.j2", "print('{{ name|upper }}')\n");
    let template = Template::builder()
        .metadata(TemplateMetadata::new("mem"))
        .variable(VariableDecl::string("name").default_value("renamed"))
        .action(ActionRule::render("pkg/run.py.j2").executable())
        .action(ActionRule::rename("pkg", "{{ name }}"))
        .build()
        .unwrap();
    let config = template
        .validate_answers(&RawAnswers::new(), ValidationMode::Strict)
        .unwrap();

    let report = Transformer::new(&fs, &template.actions)
        .transform(Path::new("/out"), &config)
        .unwrap();

    assert!(report.warnings.is_empty());
    assert_eq!(
        fs.contents(Path::new("/out/renamed/run.py")).as_deref(),
        Some("print('RENAMED')\n")
    );
    assert!(fs.is_executable(Path::new("/out/renamed/run.py")));
    assert!(!fs.exists(Path::new("/out/renamed/run.py.j2")));
}

#[test]
fn rename_onto_existing_path_fails_and_leaves_the_tree() {
    let fs = MemoryFilesystem::new()
        .with_file("/out/pkg/__init__.py", "")
        .with_file("/out/renamed/other.py", "");
    let template = memory_template();
    let config = template
        .validate_answers(
            &[("with_docs".to_owned(), "yes".to_owned())]
                .into_iter()
                .collect(),
            ValidationMode::Strict,
        )
        .unwrap();

    let err = Transformer::new(&fs, &template.actions)
        .transform(Path::new("/out"), &config)
        .unwrap_err();

    assert!(matches!(
        err,
        StencilError::Transform(TransformError::RenameTargetExists { .. })
    ));
    assert!(fs.exists(Path::new("/out/pkg/__init__.py")));
    assert!(fs.exists(Path::new("/out/renamed/other.py")));
}
