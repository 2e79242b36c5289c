//! The built-in Python project template.
//!
//! [`pyproject_variables`] and [`pyproject_actions`] are also the schema the
//! [`FilesystemTemplateLoader`](crate::template_loader::FilesystemTemplateLoader)
//! falls back to when a template directory has no `template.toml`.
//!
//! # Layouts
//!
//! The tree carries two package layouts side by side:
//!
//! - `src/{{ package_name }}/`: the flat layout
//! - `src/__namespace__/{{ package_name }}/`: the namespace-package layout
//!
//! Post-generation keeps exactly one. With `namespace = ".remove.me"` the
//! namespace directory is deleted; otherwise the flat layout is deleted and
//! `__namespace__` is renamed to the namespace.
//!
//! # Deferred files
//!
//! Packaging files (`setup.cfg`, `setup.py`, `tox.ini`, ...) and the entry
//! point modules need loops and conditionals, so they ship as `.j2` files
//! and are rendered with Jinja after the layout is settled. The computed
//! variables at the end of the schema exist for them.

use stencil_core::domain::{
    ActionRule, Condition, DirectorySpec, FileSpec, Pattern, REMOVE_ME, Template, TemplateError,
    TemplateMetadata, TemplateNode, TemplateTree, VariableDecl,
};

/// Name of the built-in template.
pub const PYPROJECT: &str = "pyproject";

pub const LICENSES: [&str; 4] = ["MIT", "Apache-2.0", "BSD-3-Clause", "GPL-3.0-only"];
pub const PYTHON_VERSIONS: [&str; 4] = ["3.6", "3.7", "3.8", "3.9"];
pub const PROJECT_TYPES: [&str; 3] = ["package", "plugin", "console-app"];

/// Package directories of both layouts, before any rename.
const PACKAGE_DIRS: [&str; 2] = [
    "src/{{ package_name }}",
    "src/__namespace__/{{ package_name }}",
];

// ── Schema ────────────────────────────────────────────────────────────────────

/// Declared variables, in prompt order.
pub fn pyproject_variables() -> Vec<VariableDecl> {
    vec![
        VariableDecl::string("project_name")
            .required()
            .pattern(Pattern::Word)
            .describe("Distribution name, e.g. my-project"),
        VariableDecl::string("package_name")
            .required()
            .pattern(Pattern::Identifier)
            .describe("Import name of the top-level package"),
        VariableDecl::string("namespace")
            .pattern(Pattern::Identifier)
            .exempt(REMOVE_ME)
            .default_value(REMOVE_ME)
            .describe("Namespace package; .remove.me for none"),
        VariableDecl::string("author_full_name").required(),
        VariableDecl::string("author_email").required().email(),
        VariableDecl::string("github_user")
            .required()
            .pattern(Pattern::Word),
        VariableDecl::string("github_email").required().email(),
        VariableDecl::string("copyright_holder").required(),
        VariableDecl::string("team_name").required(),
        VariableDecl::string("team_email").required().email(),
        VariableDecl::string("project_description").required(),
        VariableDecl::choice("license", LICENSES).default_value("MIT"),
        VariableDecl::multiselect("python_versions", PYTHON_VERSIONS)
            .default_value(PYTHON_VERSIONS.join(","))
            .describe("Supported Python versions"),
        VariableDecl::choice("project_type", PROJECT_TYPES).default_value("package"),
        VariableDecl::string("entry_point_name")
            .pattern(Pattern::Word)
            .describe("Script or plugin name; the project name if empty"),
        VariableDecl::string("entry_point_group")
            .pattern(Pattern::Identifier)
            .describe("Plugin namespace (plugin projects only)"),
        VariableDecl::string("entry_point_source")
            .pattern(Pattern::Identifier)
            .default_value("main")
            .describe("Module holding the entry point"),
        VariableDecl::string("entry_point_function")
            .pattern(Pattern::Identifier)
            .default_value("main")
            .describe("Entry point function (console apps only)"),
        VariableDecl::boolean("initialize_git")
            .default_value("false")
            .describe("Run git init in the generated project"),
        // Computed, in dependency order.
        VariableDecl::computed("least_python3", "python_versions|first"),
        VariableDecl::computed(
            "supported_pythons",
            r#""{" ~ (python_versions|join(",")|replace(".", "")) ~ "}""#,
        ),
        VariableDecl::computed(
            "python_matrix",
            r#"'"' ~ python_versions|join('", "') ~ '"'"#,
        ),
        VariableDecl::computed("has_entry_points", "project_type != 'package'"),
        VariableDecl::computed(
            "entry_point_kind",
            "'console_scripts' if project_type == 'console-app' else entry_point_group",
        ),
        VariableDecl::computed(
            "entry_point_fqdn",
            "entry_point_source ~ (':' ~ entry_point_function if project_type == 'console-app' else '')",
        ),
        VariableDecl::computed(
            "namespace_prefix",
            "'' if namespace == '.remove.me' else namespace ~ '.'",
        ),
    ]
}

/// Files at the project root rendered with Jinja, with their executable bit.
const DEFERRED_ROOT_FILES: [(&str, bool); 5] = [
    ("pyproject.toml.j2", false),
    ("setup.cfg.j2", false),
    ("setup.py.j2", true),
    ("tox.ini.j2", false),
    ("MANIFEST.in.j2", false),
];

/// Post-generation rules for the two layouts, the project types and the
/// license files.
pub fn pyproject_actions() -> Vec<ActionRule> {
    let mut rules = vec![
        ActionRule::remove("src/__namespace__").when(Condition::equals("namespace", REMOVE_ME)),
        ActionRule::remove("src/{{ package_name }}")
            .when(Condition::not_equals("namespace", REMOVE_ME)),
        ActionRule::rename("src/__namespace__", "{{ namespace }}")
            .when(Condition::not_equals("namespace", REMOVE_ME)),
    ];

    for (path, executable) in DEFERRED_ROOT_FILES {
        let rule = ActionRule::render(path);
        rules.push(if executable { rule.executable() } else { rule });
    }

    for dir in PACKAGE_DIRS {
        let package = Condition::equals("project_type", "package");
        let console = Condition::equals("project_type", "console-app");
        let plugin = Condition::equals("project_type", "plugin");

        for module in ["__main__.py.j2", "main.py.j2", "plugin.py.j2"] {
            rules.push(ActionRule::remove(format!("{dir}/{module}")).when(package.clone()));
        }

        rules.push(ActionRule::remove(format!("{dir}/plugin.py.j2")).when(console.clone()));
        rules.push(ActionRule::render(format!("{dir}/__main__.py.j2")).when(console.clone()));
        rules.push(
            ActionRule::render_to(format!("{dir}/main.py.j2"), "{{ entry_point_source }}.py")
                .when(console),
        );

        rules.push(ActionRule::remove(format!("{dir}/__main__.py.j2")).when(plugin.clone()));
        rules.push(ActionRule::remove(format!("{dir}/main.py.j2")).when(plugin.clone()));
        rules.push(
            ActionRule::render_to(format!("{dir}/plugin.py.j2"), "{{ entry_point_source }}.py")
                .when(plugin),
        );
    }

    for license in LICENSES {
        rules.push(
            ActionRule::remove(format!("LICENSES/{license}.txt"))
                .when(Condition::not_equals("license", license)),
        );
    }

    rules
}

// ── Template ──────────────────────────────────────────────────────────────────

/// The complete built-in template, files included.
pub fn pyproject() -> Result<Template, TemplateError> {
    let mut tree = TemplateTree::new()
        .with_node(file("README.md", README))
        .with_node(file("pyproject.toml.j2", PYPROJECT_TOML))
        .with_node(file("setup.cfg.j2", SETUP_CFG))
        .with_node(file("setup.py.j2", SETUP_PY))
        .with_node(file("tox.ini.j2", TOX_INI))
        .with_node(file("MANIFEST.in.j2", MANIFEST_IN))
        .with_node(file(".gitignore", GITIGNORE))
        .with_node(file(".github/workflows/ci.yml", CI_WORKFLOW))
        .with_node(file("LICENSES/MIT.txt", LICENSE_MIT))
        .with_node(file("LICENSES/Apache-2.0.txt", LICENSE_APACHE))
        .with_node(file("LICENSES/BSD-3-Clause.txt", LICENSE_BSD))
        .with_node(file("LICENSES/GPL-3.0-only.txt", LICENSE_GPL))
        .with_node(TemplateNode::Directory(DirectorySpec::new("src/__namespace__")));

    for dir in PACKAGE_DIRS {
        tree.push(TemplateNode::Directory(DirectorySpec::new(dir)));
        tree.push(file(format!("{dir}/__init__.py"), PKG_INIT));
        tree.push(file(format!("{dir}/version.py"), PKG_VERSION));
        tree.push(file(format!("{dir}/__main__.py.j2"), PKG_DUNDER_MAIN));
        tree.push(file(format!("{dir}/main.py.j2"), PKG_MAIN));
        tree.push(file(format!("{dir}/plugin.py.j2"), PKG_PLUGIN));
    }

    tree.push(file("tests/unit/__init__.py", ""));
    tree.push(file("tests/unit/test_version.py", TEST_VERSION));

    Template::builder()
        .metadata(
            TemplateMetadata::new(PYPROJECT)
                .version("1.0.0")
                .description("Python project with src layout and optional namespace package"),
        )
        .variables(pyproject_variables())
        .actions(pyproject_actions())
        .tree(tree)
        .build()
}

fn file(path: impl Into<String>, text: &'static str) -> TemplateNode {
    TemplateNode::File(FileSpec::text(path, text))
}

// ── Payload ───────────────────────────────────────────────────────────────────

const README: &str = "\
# {{ project_name }}

{{ project_description }}

Maintained by {{ team_name }} <{{ team_email }}>.
Source: https://github.com/{{ github_user }}/{{ project_name }}
";

const PYPROJECT_TOML: &str = "\
[build-system]
requires = [\"setuptools>=61\", \"wheel\"]
build-backend = \"setuptools.build_meta\"

[project]
name = \"{{ project_name }}\"
description = \"{{ project_description }}\"
readme = \"README.md\"
license = { text = \"{{ license }}\" }
requires-python = \">={{ least_python3 }}\"
authors = [{ name = \"{{ author_full_name }}\", email = \"{{ author_email }}\" }]
classifiers = [
{% for version in python_versions %}
    \"Programming Language :: Python :: {{ version }}\",
{% endfor %}
]
dynamic = [\"version\"]

[tool.setuptools.packages.find]
where = [\"src\"]
";

const SETUP_CFG: &str = "\
[metadata]
name = {{ project_name }}
version = attr: {{ namespace_prefix }}{{ package_name }}.version.__version__
author = {{ author_full_name }}
author_email = {{ author_email }}
license = {{ license }}

[options]
package_dir =
    = src
packages = find{% if namespace_prefix %}_namespace{% endif %}:
python_requires = >={{ least_python3 }}

[options.packages.find]
where = src
{% if has_entry_points %}

[options.entry_points]
{{ entry_point_kind }} =
    {{ entry_point_name or project_name }} = {{ namespace_prefix }}{{ package_name }}.{{ entry_point_fqdn }}
{% endif %}
";

const SETUP_PY: &str = "\
#!/usr/bin/env python3
\"\"\"Legacy setuptools entry for {{ project_name }}.\"\"\"

from setuptools import setup

setup()
";

const TOX_INI: &str = "\
[tox]
envlist = py{{ supported_pythons }}
isolated_build = true

[testenv]
deps = pytest
commands = pytest tests
";

const MANIFEST_IN: &str = "\
include README.md
include LICENSES/{{ license }}.txt
{% if has_entry_points %}
include src/{{ namespace_prefix|replace('.', '/') }}{{ package_name }}/{{ entry_point_source }}.py
{% endif %}
";

const GITIGNORE: &str = "\
__pycache__/
*.egg-info/
.tox/
build/
dist/
";

const CI_WORKFLOW: &str = "\
name: CI
on: [push, pull_request]
jobs:
  test:
    runs-on: ubuntu-latest
    strategy:
      matrix:
        python-version: [{{ python_matrix }}]
    steps:
      - uses: actions/checkout@v4
      - uses: actions/setup-python@v5
        with:
          python-version: ${{ matrix.python-version }}
      - run: pip install tox && tox
";

const LICENSE_MIT: &str = "\
MIT License

Copyright (c) {{ copyright_holder }}

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction.
";

const LICENSE_APACHE: &str = "\
Copyright {{ copyright_holder }}

Licensed under the Apache License, Version 2.0 (the \"License\");
you may not use this file except in compliance with the License.
";

const LICENSE_BSD: &str = "\
BSD 3-Clause License

Copyright (c) {{ copyright_holder }}
All rights reserved.
";

const LICENSE_GPL: &str = "\
{{ project_name }}
Copyright (C) {{ copyright_holder }}

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License, version 3.
";

const PKG_INIT: &str = "\
\"\"\"{{ project_description }}\"\"\"

from .version import __version__

__all__ = [\"__version__\"]
";

const PKG_VERSION: &str = "\
\"\"\"Version of {{ package_name }}.\"\"\"

__version__ = \"0.1.0\"
";

const PKG_DUNDER_MAIN: &str = "\
from .{{ entry_point_source }} import {{ entry_point_function }}

if __name__ == \"__main__\":
    {{ entry_point_function }}()
";

const PKG_MAIN: &str = "\
\"\"\"Command line entry point of {{ project_name }}.\"\"\"


def {{ entry_point_function }}() -> None:
    print(\"{{ entry_point_name or project_name }}\")
";

const PKG_PLUGIN: &str = "\
\"\"\"{{ entry_point_name or project_name }} plugin for {{ entry_point_kind }}.\"\"\"


def register(registry) -> None:
    registry.add(\"{{ package_name }}\")
";

const TEST_VERSION: &str = "\
def test_version_is_set():
    from importlib import import_module

    assert import_module(\"{{ package_name }}.version\").__version__
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_template_is_self_consistent() {
        pyproject().unwrap().validate().unwrap();
    }

    #[test]
    fn schema_has_every_declared_variable_once() {
        let template = pyproject().unwrap();
        assert_eq!(template.schema.len(), 26);
        assert!(template.schema.contains("initialize_git"));
        assert_eq!(template.schema.variables().filter(|d| d.is_computed()).count(), 7);
    }

    #[test]
    fn every_deferred_file_has_a_render_or_remove_rule() {
        let template = pyproject().unwrap();
        let rules = pyproject_actions();
        for node in &template.tree.nodes {
            if node.path().ends_with(".j2") {
                assert!(
                    rules.iter().any(|r| r.path() == node.path()),
                    "{} is never rendered",
                    node.path()
                );
            }
        }
    }

    #[test]
    fn setup_py_is_rendered_executable() {
        let rule = pyproject_actions()
            .into_iter()
            .find(|r| r.path() == "setup.py.j2")
            .unwrap();
        assert!(matches!(rule, ActionRule::Render { executable: true, .. }));
    }

    #[test]
    fn one_license_rule_per_license() {
        let license_rules = pyproject_actions()
            .iter()
            .filter(|r| r.path().starts_with("LICENSES/"))
            .count();
        assert_eq!(license_rules, LICENSES.len());
    }
}
