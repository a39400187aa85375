//! Package discovery and per-package inputs
//!
//! A package is a directory holding a `package.xml`. Discovery walks a
//! workspace the way the ROS build tools do: hidden directories and trees
//! marked with an ignore marker file are skipped, and packages are not
//! searched inside other packages.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::models::IgnoreSet;
use crate::error::{LicheckError, Result};
use crate::paths::{self, DEFAULT_IGNORE_PATTERNS, PACKAGE_IGNORE_MARKERS};

/// Find all packages at or below `path`, in path order
pub fn find_packages(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(LicheckError::PathNotFound(path.to_path_buf()));
    }
    if paths::manifest(path).is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut packages = Vec::new();
    let mut walker = WalkDir::new(path).follow_links(false).sort_by_file_name().into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| LicheckError::Io(e.into()))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.depth() > 0 && (is_hidden(&entry) || is_marked_ignored(entry.path())) {
            walker.skip_current_dir();
            continue;
        }
        if paths::manifest(entry.path()).is_file() {
            log::debug!("Found package in {}", entry.path().display());
            packages.push(entry.path().to_path_buf());
            walker.skip_current_dir();
        }
    }

    if packages.is_empty() {
        return Err(LicheckError::NoPackages(path.to_path_buf()));
    }
    Ok(packages)
}

/// The ignore set of a package
///
/// Built-in defaults, then `extra` patterns (from configuration), then the
/// lines of the package's `.scanignore`. Invalid patterns are skipped with
/// a warning; a missing ignore file is fine.
pub fn resolve_ignore_set(package_root: &Path, extra: &[String]) -> Result<IgnoreSet> {
    let mut set = IgnoreSet::default();
    for pattern in DEFAULT_IGNORE_PATTERNS.iter().copied().chain(extra.iter().map(String::as_str)) {
        if let Err(e) = set.push(pattern) {
            log::warn!("Skipping ignore pattern '{pattern}': {e}");
        }
    }

    let ignore_file = paths::ignore_file(package_root);
    if ignore_file.is_file() {
        let content = fs::read_to_string(&ignore_file)?;
        set.extend_from_content(&content);
        log::debug!("Using {} ignore patterns for {}", set.len(), package_root.display());
    }

    Ok(set)
}

/// Check if an entry is hidden (starts with .)
fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

fn is_marked_ignored(dir: &Path) -> bool {
    PACKAGE_IGNORE_MARKERS.iter().any(|marker| dir.join(marker).exists())
}
