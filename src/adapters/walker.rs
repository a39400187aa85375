//! Package tree walker
//!
//! Enumerates the files of a package, applies the ignore set and hands each
//! remaining file to a [`LicenseScanner`]. Files are scanned in parallel and
//! merged into a path-ordered map.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use walkdir::WalkDir;

use crate::core::models::{EvidenceMap, FileEvidence, IgnoreSet, LicenseTexts};
use crate::core::ports::{FileScan, LicenseScanner};

/// Errors that can occur while walking a package
#[derive(Debug, Error)]
pub enum WalkError {
    /// Root path does not exist
    #[error("root path does not exist: {0}")]
    RootNotFound(PathBuf),

    /// Error walking directory tree
    #[error("walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error while listing a directory
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the walk found
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Evidence for every non-ignored file
    pub evidence: EvidenceMap,

    /// Every file reached by the walk, ignored or not
    pub all_files: BTreeSet<String>,
}

impl ScanOutcome {
    /// License texts among the scanned files
    #[must_use]
    pub fn license_texts(&self) -> LicenseTexts {
        self.evidence
            .values()
            .filter_map(|e| e.license_text.as_ref().map(|id| (e.path.clone(), id.clone())))
            .collect()
    }

    /// Names of the files directly in the package root
    #[must_use]
    pub fn top_level_files(&self) -> Vec<String> {
        self.all_files.iter().filter(|p| !p.contains('/')).cloned().collect()
    }
}

/// Scan every file below `root`
///
/// Ignored directories are not descended; ignored files are recorded in
/// `all_files` but not scanned. A file the scanner fails on gets an empty
/// record with a note.
pub fn scan(root: &Path, ignore: &IgnoreSet, scanner: &dyn LicenseScanner) -> Result<ScanOutcome, WalkError> {
    if !root.is_dir() {
        return Err(WalkError::RootNotFound(root.to_path_buf()));
    }

    let mut all_files = BTreeSet::new();
    let mut to_scan: Vec<(String, PathBuf)> = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).into_iter().filter_entry(|e| {
        // Don't filter the root directory itself
        if e.path() == root || !e.file_type().is_dir() {
            return true;
        }
        !ignore.matches_dir(&relative_path(root, e.path()))
    }) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = relative_path(root, entry.path());
        if !ignore.matches(&relative) {
            to_scan.push((relative.clone(), entry.path().to_path_buf()));
        }
        all_files.insert(relative);
    }

    log::debug!(
        "Scanning {} of {} files in {}",
        to_scan.len(),
        all_files.len(),
        root.display()
    );

    let evidence: EvidenceMap = to_scan
        .par_iter()
        .map(|(relative, absolute)| {
            let evidence = match scanner.scan_file(absolute) {
                Ok(scan) => into_evidence(relative, scan),
                Err(e) => {
                    // Non-fatal, the file just has no findings
                    log::warn!("Could not scan {relative}: {e}");
                    FileEvidence::unscannable(relative.as_str(), e.to_string())
                },
            };
            (relative.clone(), evidence)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect();

    Ok(ScanOutcome { evidence, all_files })
}

/// License texts at the root of the repository containing a package
///
/// Only the top-level files of `repo_root` are scanned. Keys are relative to
/// the package, e.g. `../LICENSE`. Nothing is returned when the package is
/// the repository root or not below it.
pub fn scan_repository_texts(
    package_root: &Path,
    repo_root: &Path,
    scanner: &dyn LicenseScanner,
) -> Result<LicenseTexts, WalkError> {
    let Ok(inner) = package_root.strip_prefix(repo_root) else {
        return Ok(LicenseTexts::new());
    };
    let depth = inner.components().count();
    if depth == 0 {
        return Ok(LicenseTexts::new());
    }
    let prefix = "../".repeat(depth);

    let mut texts = LicenseTexts::new();
    for entry in fs::read_dir(repo_root)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        match scanner.scan_file(&entry.path()) {
            Ok(FileScan {
                license_text: Some(id),
                ..
            }) => {
                log::debug!("Repository license text {name}: {id}");
                texts.insert(format!("{prefix}{name}"), id);
            },
            Ok(_) => {},
            Err(e) => log::debug!("Skipping repository file {name}: {e}"),
        }
    }

    Ok(texts)
}

fn into_evidence(path: &str, scan: FileScan) -> FileEvidence {
    FileEvidence {
        path: path.to_string(),
        detected_licenses: scan.licenses,
        copyright_lines: scan.copyrights,
        license_text: scan.license_text,
        note: None,
    }
}

/// Package-relative, `/`-separated path
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
