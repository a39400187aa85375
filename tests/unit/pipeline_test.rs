//! Tests for the per-package pipeline with a scripted scanner

use std::collections::BTreeMap;
use std::path::Path;

use licheck::LicheckError;
use licheck::adapters::BuiltinCatalog;
use licheck::core::models::{Policy, Severity};
use licheck::core::ports::{FileScan, LicenseScanner, ScanError};
use licheck::core::services::{Check, evaluate};
use licheck::pipeline::Pipeline;

use crate::common::{APACHE_TEXT, MIT_TEXT, TestPackage, result_of};

/// Scanner answering from a table keyed by file name
#[derive(Default)]
struct ScriptedScanner {
    scans: BTreeMap<&'static str, FileScan>,
}

impl ScriptedScanner {
    fn license(mut self, file: &'static str, id: &str) -> Self {
        self.scans.entry(file).or_default().licenses.insert(id.to_string());
        self
    }

    fn text(mut self, file: &'static str, id: &str) -> Self {
        let scan = self.scans.entry(file).or_default();
        scan.licenses.insert(id.to_string());
        scan.license_text = Some(id.to_string());
        self
    }
}

impl LicenseScanner for ScriptedScanner {
    fn scan_file(&self, path: &Path) -> Result<FileScan, ScanError> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if name.ends_with(".bin") {
            return Err(ScanError::Binary);
        }
        Ok(self.scans.get(name).cloned().unwrap_or_default())
    }
}

#[test]
fn test_context_collects_evidence() {
    let pkg = TestPackage::new("<license>MIT</license>");
    pkg.add_file("LICENSE", "text");
    pkg.add_file("src/a.c", "code");
    pkg.add_file("CMakeLists.txt", "cmake");

    let scanner = ScriptedScanner::default().text("LICENSE", "MIT").license("a.c", "MIT");
    let pipeline = Pipeline::new(&scanner, &BuiltinCatalog, Vec::new());
    let (ctx, _) = pipeline.context(pkg.path()).unwrap();

    assert_eq!(ctx.name, "my_pkg");
    assert_eq!(ctx.evidence.keys().collect::<Vec<_>>(), vec!["LICENSE", "src/a.c"]);
    assert!(ctx.all_files.contains("CMakeLists.txt"));
    assert_eq!(ctx.license_texts.get("LICENSE").map(String::as_str), Some("MIT"));

    let decl = ctx.declarations.iter().next().unwrap();
    assert_eq!(decl.license_file.as_deref(), Some("LICENSE"));
    assert_eq!(decl.text_license.as_deref(), Some("MIT"));
}

#[test]
fn test_configured_ignores_apply() {
    let pkg = TestPackage::new("<license>MIT</license>");
    pkg.add_file("docs/index.html", "html");
    pkg.add_file("src/a.c", "code");

    let scanner = ScriptedScanner::default().license("index.html", "GPL-3.0-only");
    let pipeline = Pipeline::new(&scanner, &BuiltinCatalog, vec!["docs".to_string()]);
    let (ctx, _) = pipeline.context(pkg.path()).unwrap();

    assert!(!ctx.evidence.contains_key("docs/index.html"));
    assert!(ctx.evidence.contains_key("src/a.c"));
}

#[test]
fn test_unscannable_file_is_noted() {
    let pkg = TestPackage::new("<license>MIT</license>");
    pkg.add_file("LICENSE", "text");
    pkg.add_file("data/blob.bin", "\0\0");

    let scanner = ScriptedScanner::default().text("LICENSE", "MIT");
    let report = Pipeline::new(&scanner, &BuiltinCatalog, Vec::new()).check(pkg.path(), false).unwrap();

    let code = result_of(&report, Check::LicensesInCode);
    assert_eq!(code.severity, Severity::Pass);
    assert!(code.details.iter().any(|d| d.contains("'data/blob.bin'")), "{:?}", code.details);
    assert_eq!(report.files_scanned, 2);
}

#[test]
fn test_alias_tag_matches_spdx_detections() {
    let pkg = TestPackage::new(r#"<license file="COPYING">LGPLv3</license>"#);
    pkg.add_file("COPYING", "text");
    pkg.add_file("src/a.c", "code");

    let scanner = ScriptedScanner::default().text("COPYING", "LGPL-3.0-only").license("a.c", "LGPL-3.0-only");
    let report = Pipeline::new(&scanner, &BuiltinCatalog, Vec::new()).check(pkg.path(), false).unwrap();

    for r in &report.results {
        assert_eq!(r.severity, Severity::Pass, "{}: {}", r.check_name, r.message);
    }
}

#[test]
fn test_missing_manifest_is_an_input_error() {
    let pkg = TestPackage::new("");
    std::fs::remove_file(pkg.path().join("package.xml")).unwrap();

    let scanner = ScriptedScanner::default();
    let err = Pipeline::new(&scanner, &BuiltinCatalog, Vec::new()).check(pkg.path(), false).unwrap_err();
    assert!(matches!(err, LicheckError::Manifest { .. }));
}

#[test]
fn test_malformed_manifest_is_an_input_error() {
    let pkg = TestPackage::with_manifest("<package format=\"3\"><name>x</name>");

    let scanner = ScriptedScanner::default();
    let err = Pipeline::new(&scanner, &BuiltinCatalog, Vec::new()).check(pkg.path(), false).unwrap_err();
    assert!(matches!(err, LicheckError::Manifest { .. }));
}

#[test]
fn test_package_name_falls_back_to_directory() {
    let pkg = TestPackage::with_manifest("<package format=\"3\"><license>MIT</license></package>");

    let scanner = ScriptedScanner::default();
    let report = Pipeline::new(&scanner, &BuiltinCatalog, Vec::new()).check(pkg.path(), false).unwrap();
    assert_eq!(report.name, "my_pkg");
    assert_eq!(result_of(&report, Check::Schema).severity, Severity::Error);
}

#[test]
fn test_repeated_runs_are_identical() {
    let pkg = TestPackage::new(
        r#"<license>MIT</license>
  <license file="vendor/LICENSE" source-files="vendor/*">Apache 2.0</license>"#,
    );
    pkg.add_file("LICENSE", MIT_TEXT);
    pkg.add_file("vendor/LICENSE", APACHE_TEXT);
    pkg.add_file("src/a.cpp", "// Copyright 2023 Acme Corp.\n// SPDX-License-Identifier: MIT\n");
    pkg.add_file("src/b.cpp", "// SPDX-License-Identifier: BSD-3-Clause\n");
    pkg.add_file("data/blob.bin", "\0\0");

    let first = pkg.check();
    let second = pkg.check();
    assert_eq!(first.results, second.results);
    assert_eq!(first.files_scanned, second.files_scanned);

    for (continue_on_error, warnings_as_error) in [(false, false), (true, false), (false, true), (true, true)] {
        let policy = Policy {
            continue_on_error,
            warnings_as_error,
        };
        assert_eq!(evaluate(&first.results, policy), evaluate(&second.results, policy));
    }
    assert_eq!(result_of(&first, Check::LicensesInCode).severity, Severity::Error);
}
