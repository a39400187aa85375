//! Tests for package discovery and ignore set resolution

use std::fs;

use licheck::LicheckError;
use licheck::package::{find_packages, resolve_ignore_set};
use tempfile::TempDir;

use crate::common::{TestPackage, manifest_xml};

#[test]
fn test_workspace_packages_in_path_order() {
    let ws = TempDir::new().unwrap();
    for pkg in ["src/zeta", "src/alpha", "tools/beta"] {
        fs::create_dir_all(ws.path().join(pkg)).unwrap();
        fs::write(ws.path().join(pkg).join("package.xml"), manifest_xml("")).unwrap();
    }

    let found = find_packages(ws.path()).unwrap();
    assert_eq!(
        found,
        vec![ws.path().join("src/alpha"), ws.path().join("src/zeta"), ws.path().join("tools/beta")]
    );
}

#[test]
fn test_missing_path() {
    let ws = TempDir::new().unwrap();
    let err = find_packages(&ws.path().join("nope")).unwrap_err();
    assert!(matches!(err, LicheckError::PathNotFound(_)));
}

#[test]
fn test_directory_without_packages() {
    let ws = TempDir::new().unwrap();
    fs::write(ws.path().join("README.md"), "# nothing here\n").unwrap();
    let err = find_packages(ws.path()).unwrap_err();
    assert!(matches!(err, LicheckError::NoPackages(_)));
}

#[test]
fn test_default_ignores() {
    let pkg = TestPackage::new("");
    let set = resolve_ignore_set(pkg.path(), &[]).unwrap();

    assert!(set.matches("package.xml"));
    assert!(set.matches("CMakeLists.txt"));
    assert!(set.matches("copyright"));
    assert!(set.matches(".git/config"));
    assert!(!set.matches("src/main.cpp"));
}

#[test]
fn test_ignore_file_extends_defaults() {
    let pkg = TestPackage::new("");
    pkg.add_file(".scanignore", "# generated\nbuild/\n*.bag\n");
    let extra = vec!["docs/**".to_string()];

    let set = resolve_ignore_set(pkg.path(), &extra).unwrap();
    assert!(set.matches("package.xml"));
    assert!(set.matches("docs/api/index.html"));
    assert!(set.matches("build/out.o"));
    assert!(set.matches("data/run.bag"));
    assert!(!set.matches("src/a.cpp"));
}

#[test]
fn test_invalid_extra_pattern_is_skipped() {
    let pkg = TestPackage::new("");
    let extra = vec!["[broken".to_string(), "*.log".to_string()];

    let set = resolve_ignore_set(pkg.path(), &extra).unwrap();
    assert!(set.matches("x.log"));
    assert!(!set.patterns().any(|p| p == "[broken"));
}
