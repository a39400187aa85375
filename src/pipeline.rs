//! Per-package check pipeline
//!
//! ignore set → scan → declarations → checks, plus the optional copyright
//! file. One [`Pipeline`] is reused for every package of a run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::adapters::git::{self, RepoInfo};
use crate::adapters::walker::{self, scan_repository_texts};
use crate::adapters::read_manifest;
use crate::core::models::{CheckResult, DeclarationSet, PackageContext};
use crate::core::ports::{LicenseCatalog, LicenseScanner};
use crate::core::services::{CopyrightHeader, render_copyright_file, run_checks};
use crate::error::{LicheckError, Result};
use crate::package::resolve_ignore_set;
use crate::paths;

/// Outcome of checking one package
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    /// Package name
    pub name: String,

    /// Package root
    pub path: PathBuf,

    /// Results of every check, in check order
    pub results: Vec<CheckResult>,

    /// Number of files scanned
    pub files_scanned: usize,

    /// Generated copyright file, if one was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_file: Option<PathBuf>,
}

/// Runs the checks of one package at a time
#[derive(Debug)]
pub struct Pipeline<'a, S: LicenseScanner, C: LicenseCatalog> {
    scanner: &'a S,
    catalog: &'a C,
    extra_ignores: Vec<String>,
}

impl<'a, S: LicenseScanner, C: LicenseCatalog> Pipeline<'a, S, C> {
    /// Create a pipeline
    #[must_use]
    pub const fn new(scanner: &'a S, catalog: &'a C, extra_ignores: Vec<String>) -> Self {
        Self {
            scanner,
            catalog,
            extra_ignores,
        }
    }

    /// Gather everything the checks need to know about a package
    pub fn context(&self, package_root: &Path) -> Result<(PackageContext, Option<RepoInfo>)> {
        let root = package_root.canonicalize()?;

        let manifest = read_manifest(&paths::manifest(&root)).map_err(|source| LicheckError::Manifest {
            package: root.clone(),
            source,
        })?;

        let ignore = resolve_ignore_set(&root, &self.extra_ignores)?;
        let outcome = walker::scan(&root, &ignore, self.scanner)?;

        let repo = git::discover(&root);
        let mut license_texts = outcome.license_texts();
        if let Some(repo) = &repo {
            license_texts.extend(scan_repository_texts(&root, &repo.root, self.scanner)?);
        }

        let declarations = DeclarationSet::build(
            &manifest.licenses,
            self.catalog,
            &license_texts,
            &outcome.top_level_files(),
        );

        let mut all_files = outcome.all_files;
        // Declared text files outside the package still exist
        for decl in &declarations {
            if let Some(file) = decl.license_file.as_deref().filter(|f| f.starts_with("../")) {
                if root.join(file).is_file() {
                    all_files.insert(file.to_string());
                }
            }
        }

        let name = manifest.name().map_or_else(
            || root.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
            String::from,
        );

        let ctx = PackageContext {
            name,
            manifest,
            declarations,
            evidence: outcome.evidence,
            all_files,
            license_texts,
        };
        Ok((ctx, repo))
    }

    /// Check one package, optionally writing its copyright file
    pub fn check(&self, package_root: &Path, write_copyright: bool) -> Result<PackageReport> {
        let (ctx, repo) = self.context(package_root)?;
        log::info!("Checking package {} ({} files)", ctx.name, ctx.evidence.len());

        let results = run_checks(&ctx);
        for r in &results {
            log::debug!("{}: {}", r.check_name, r.severity);
        }

        let copyright_file = if write_copyright {
            Some(write_copyright_file(package_root, &ctx, repo.as_ref())?)
        } else {
            None
        };

        Ok(PackageReport {
            name: ctx.name,
            path: package_root.to_path_buf(),
            results,
            files_scanned: ctx.evidence.len(),
            copyright_file,
        })
    }
}

/// Render and write `<package>/copyright`
pub fn write_copyright_file(package_root: &Path, ctx: &PackageContext, repo: Option<&RepoInfo>) -> Result<PathBuf> {
    let header = CopyrightHeader {
        upstream_name: &ctx.name,
        source: repo.and_then(|r| r.remote_url.as_deref()),
    };
    let content = render_copyright_file(header, &ctx.declarations, &ctx.evidence, |file| {
        fs::read_to_string(package_root.join(file)).ok()
    });

    let path = paths::copyright_file(package_root);
    fs::write(&path, content)?;
    log::info!("Wrote {}", path.display());
    Ok(path)
}
