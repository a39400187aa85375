//! Integration tests for the licheck CLI
//!
//! These tests run the binary against small package trees and check the
//! report and the exit code, the way a CI job would.

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use test_case::test_case;

const MIT_TEXT: &str = "MIT License

Copyright (c) 2024 Jane Doe

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction.

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
";

const APACHE_TEXT: &str = "
                                 Apache License
                           Version 2.0, January 2004
                        http://www.apache.org/licenses/
";

const BSD3_TEXT: &str = "Redistribution and use in source and binary forms, with or without
modification, are permitted provided that the following conditions are met:

1. Redistributions of source code must retain the above copyright notice,
this list of conditions and the following disclaimer.

3. Neither the name of the copyright holder nor the names of its
contributors may be used to endorse or promote products derived from
this software without specific prior written permission.
";

/// A workspace directory that doubles as `$HOME`, so no user config leaks in
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a package with the given `<license>` lines
    fn package(&self, name: &str, licenses: &str) -> PathBuf {
        let root = self.path().join("src").join(name);
        fs::create_dir_all(&root).unwrap();
        fs::write(
            root.join("package.xml"),
            format!(
                r#"<?xml version="1.0"?>
<package format="3">
  <name>{name}</name>
  <version>0.1.0</version>
  <description>Integration test package</description>
  <maintainer email="jane@example.com">Jane Doe</maintainer>
  {licenses}
</package>
"#
            ),
        )
        .unwrap();
        root
    }

    fn file(&self, path: &str, content: &str) {
        let full_path = self.path().join(path);
        fs::create_dir_all(full_path.parent().unwrap()).unwrap();
        fs::write(full_path, content).unwrap();
    }

    /// A licheck command isolated from the user's environment
    fn licheck(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("licheck"));
        cmd.env("HOME", self.path()).env("NO_COLOR", "1").env_remove("RUST_LOG");
        cmd
    }
}

/// Apache-2.0 declared, MIT found in the code
fn undeclared_license() -> (Workspace, PathBuf) {
    let ws = Workspace::new();
    let pkg = ws.package("driver", "<license>Apache-2.0</license>");
    ws.file("src/driver/LICENSE", APACHE_TEXT);
    ws.file("src/driver/src/a.cpp", "// SPDX-License-Identifier: MIT\nint main() {}\n");
    (ws, pkg)
}

/// Two scoped declarations with their own license texts
fn disjoint_scopes() -> (Workspace, PathBuf) {
    let ws = Workspace::new();
    let pkg = ws.package(
        "planner",
        r#"<license file="LICENSE" source-files="src/*">MIT</license>
  <license file="vendor/LICENSE" source-files="vendor/*">BSD-3-Clause</license>"#,
    );
    ws.file("src/planner/LICENSE", MIT_TEXT);
    ws.file("src/planner/vendor/LICENSE", BSD3_TEXT);
    ws.file("src/planner/src/plan.cpp", "// Copyright 2023 Acme Corp.\n// SPDX-License-Identifier: MIT\n");
    ws.file("src/planner/vendor/lib.c", "/* SPDX-License-Identifier: BSD-3-Clause */\n");
    (ws, pkg)
}

/// Two declarations without `source-files`
fn two_catch_alls() -> (Workspace, PathBuf) {
    let ws = Workspace::new();
    let pkg = ws.package(
        "msgs",
        r#"<license file="LICENSE-MIT">MIT</license>
  <license file="LICENSE-APACHE">Apache-2.0</license>"#,
    );
    ws.file("src/msgs/LICENSE-MIT", MIT_TEXT);
    ws.file("src/msgs/LICENSE-APACHE", APACHE_TEXT);
    (ws, pkg)
}

// =============================================================================
// EXIT CODE TESTS
// =============================================================================

#[test_case(undeclared_license, &[], 2 ; "error")]
#[test_case(undeclared_license, &["-w"], 2 ; "error with warnings as error")]
#[test_case(undeclared_license, &["-e"], 0 ; "error with continue on error")]
#[test_case(disjoint_scopes, &[], 0 ; "pass")]
#[test_case(disjoint_scopes, &["-w"], 0 ; "pass with warnings as error")]
#[test_case(two_catch_alls, &[], 1 ; "warning")]
#[test_case(two_catch_alls, &["--warnings_as_error"], 2 ; "warning promoted")]
#[test_case(two_catch_alls, &["-e"], 1 ; "warning with continue on error")]
#[test_case(two_catch_alls, &["-w", "-e"], 0 ; "warning promoted then ignored")]
fn test_exit_code(setup: fn() -> (Workspace, PathBuf), flags: &[&str], expected: i32) {
    let (ws, pkg) = setup();
    ws.licheck().args(flags).arg(&pkg).assert().code(expected);
}

// =============================================================================
// REPORT TESTS
// =============================================================================

#[test]
fn test_undeclared_license_is_reported() {
    let (ws, pkg) = undeclared_license();
    ws.licheck()
        .arg(&pkg)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("[driver]"))
        .stdout(predicate::str::contains("LicensesInCodeCheck"))
        .stdout(predicate::str::contains("'src/a.cpp': MIT"))
        .stdout(predicate::str::contains("Overall: ERROR"));
}

#[test]
fn test_passing_package_lists_every_check() {
    let (ws, pkg) = disjoint_scopes();
    ws.licheck()
        .arg(&pkg)
        .assert()
        .success()
        .stdout(predicate::str::contains("SchemaCheck"))
        .stdout(predicate::str::contains("LicenseTagExistsCheck"))
        .stdout(predicate::str::contains("LicenseTagIsInSpdxListCheck"))
        .stdout(predicate::str::contains("LicenseTextExistsCheck"))
        .stdout(predicate::str::contains("LicensesInCodeCheck"))
        .stdout(predicate::str::contains("LicenseFilesReferencedCheck"))
        .stdout(predicate::str::contains("Overall: PASS"));
}

#[test]
fn test_two_catch_alls_warn() {
    let (ws, pkg) = two_catch_alls();
    ws.licheck()
        .arg(&pkg)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("at most one license tag without source-files"))
        .stdout(predicate::str::contains("Overall: WARNING"));
}

#[test]
fn test_continue_on_error_keeps_the_verdict() {
    let (ws, pkg) = undeclared_license();
    ws.licheck()
        .args(["--continue_on_error"])
        .arg(&pkg)
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: ERROR"))
        .stdout(predicate::str::contains("(ignored, --continue_on_error)"));
}

#[test]
fn test_continue_on_error_keeps_warning_exit_code() {
    let (ws, pkg) = two_catch_alls();
    ws.licheck()
        .args(["--continue_on_error"])
        .arg(&pkg)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Overall: WARNING"))
        .stdout(predicate::str::contains("(ignored, --continue_on_error)").not());
}

#[test]
fn test_quiet_hides_passing_checks() {
    let (ws, pkg) = undeclared_license();
    ws.licheck()
        .arg("-q")
        .arg(&pkg)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("LicensesInCodeCheck"))
        .stdout(predicate::str::contains("SchemaCheck").not());
}

#[test]
fn test_verbose_lists_files() {
    let (ws, pkg) = undeclared_license();
    ws.licheck()
        .arg("-v")
        .arg(&pkg)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("file: src/a.cpp"))
        .stdout(predicate::str::contains("files scanned"));
}

#[test]
fn test_json_output() {
    let (ws, pkg) = undeclared_license();
    let output = ws.licheck().arg("--json").arg(&pkg).output().unwrap();
    assert_eq!(output.status.code(), Some(2));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["verdict"]["overall_severity"], "error");
    assert_eq!(report["verdict"]["exit_code"], 2);
    assert_eq!(report["packages"][0]["name"], "driver");
    assert_eq!(report["packages"][0]["results"].as_array().unwrap().len(), 6);
    assert_eq!(report["packages"][0]["results"][4]["check_name"], "LicensesInCodeCheck");
    assert_eq!(report["packages"][0]["results"][4]["evidence_paths"][0], "src/a.cpp");
}

// =============================================================================
// WORKSPACE TESTS
// =============================================================================

#[test]
fn test_workspace_reports_every_package() {
    let ws = Workspace::new();
    ws.package("alpha", "<license>MIT</license>");
    ws.file("src/alpha/LICENSE", MIT_TEXT);
    ws.package("beta", "");
    ws.file("src/ignored/COLCON_IGNORE", "");
    ws.package("ignored/gamma", "<license>MIT</license>");

    ws.licheck()
        .arg(ws.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("[alpha]"))
        .stdout(predicate::str::contains("[beta]"))
        .stdout(predicate::str::contains("No license tag defined."))
        .stdout(predicate::str::contains("[gamma]").not());
}

#[test]
fn test_default_path_is_current_directory() {
    let (ws, pkg) = disjoint_scopes();
    ws.licheck().current_dir(&pkg).assert().success().stdout(predicate::str::contains("[planner]"));
}

#[test]
fn test_scanignore_excludes_files() {
    let (ws, pkg) = undeclared_license();
    ws.file("src/driver/.scanignore", "# third party\nsrc/a.cpp\n");
    ws.licheck().arg(&pkg).assert().success();
}

// =============================================================================
// COPYRIGHT FILE TESTS
// =============================================================================

#[test]
fn test_generate_copyright_file() {
    let (ws, pkg) = disjoint_scopes();
    ws.licheck()
        .arg("--generate_copyright_file")
        .arg(&pkg)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let content = fs::read_to_string(pkg.join("copyright")).unwrap();
    assert!(content.starts_with("Format: https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/\n"));
    assert!(content.contains("Upstream-Name: planner\n"));
    assert!(content.contains("Files: src/*\nCopyright: 2023 Acme Corp.\nLicense: MIT\n"));
    assert!(content.contains("Files: vendor/*\n"));
    assert!(content.contains("License: BSD-3-Clause\n"));
}

#[test]
fn test_copyright_file_written_even_when_checks_fail() {
    let (ws, pkg) = undeclared_license();
    ws.licheck().arg("-c").arg(&pkg).assert().code(2);
    assert!(pkg.join("copyright").is_file());
}

// =============================================================================
// CONFIG TESTS
// =============================================================================

#[test]
fn test_config_file_sets_policy() {
    let (ws, pkg) = two_catch_alls();
    ws.file("licheck.toml", "[policy]\nwarnings_as_error = true\n");
    ws.licheck().arg("--config").arg(ws.path().join("licheck.toml")).arg(&pkg).assert().code(2);
}

#[test]
fn test_home_config_is_loaded() {
    let (ws, pkg) = undeclared_license();
    ws.file(".licheck/config.toml", "[scan]\nignore = [\"*.cpp\"]\n");
    ws.licheck().arg(&pkg).assert().success();
}

#[test]
fn test_missing_config_file() {
    let (ws, pkg) = disjoint_scopes();
    ws.licheck()
        .arg("--config")
        .arg(ws.path().join("nope.toml"))
        .arg(&pkg)
        .assert()
        .code(64)
        .stderr(predicate::str::contains("invalid config"));
}

// =============================================================================
// INPUT ERROR TESTS
// =============================================================================

#[test]
fn test_missing_path() {
    let ws = Workspace::new();
    ws.licheck()
        .arg(ws.path().join("does-not-exist"))
        .assert()
        .code(64)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn test_no_packages() {
    let ws = Workspace::new();
    ws.file("README.md", "# empty\n");
    ws.licheck()
        .arg(ws.path())
        .assert()
        .code(64)
        .stderr(predicate::str::contains("no packages found"));
}

#[test]
fn test_malformed_manifest() {
    let ws = Workspace::new();
    ws.file("src/broken/package.xml", "<package format=\"3\"><name>broken</name>");
    ws.licheck()
        .arg(ws.path())
        .assert()
        .code(64)
        .stderr(predicate::str::contains("invalid manifest"));
}

#[test_case(&["--bogus"] ; "unknown flag")]
#[test_case(&["-v", "-q"] ; "verbose and quiet")]
fn test_usage_errors(args: &[&str]) {
    let ws = Workspace::new();
    ws.licheck().args(args).assert().code(64);
}

#[test]
fn test_help() {
    let ws = Workspace::new();
    ws.licheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--generate_copyright_file"))
        .stdout(predicate::str::contains("--continue_on_error"))
        .stdout(predicate::str::contains("--warnings_as_error"));
}
