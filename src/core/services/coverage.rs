//! Coverage service - matches detected licenses against declaration scopes
//!
//! This module contains pure matching logic with no I/O dependencies.

use std::collections::BTreeSet;

use crate::core::models::{DeclarationSet, EvidenceMap, FileEvidence};

/// A detected license no matching declaration covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uncovered {
    /// File the license was detected in
    pub path: String,

    /// The detected identifier
    pub license: String,

    /// Identifier of a declaration whose license text is of this license
    /// while its tag names another one
    pub declared_as: Option<String>,
}

/// License identifiers covering a file
///
/// The union of the identifiers (as written and as resolved SPDX ids) of
/// every declaration whose scope contains the file. A declaration without a
/// scope contains every file.
#[must_use]
pub fn covered_licenses<'a>(declarations: &'a DeclarationSet, path: &'a str) -> BTreeSet<&'a str> {
    declarations
        .matching(path)
        .flat_map(|d| std::iter::once(d.identifier.as_str()).chain(d.spdx_id.as_deref()))
        .collect()
}

/// Whether a file takes part in coverage matching
///
/// Only the license text files the declarations reference are exempt; they
/// are checked by the license text checks instead. Any other file, however
/// much license prose it holds, is matched against the scopes.
#[must_use]
pub fn is_subject_to_coverage(declarations: &DeclarationSet, evidence: &FileEvidence) -> bool {
    !declarations.is_license_file(&evidence.path)
}

/// Find every detected license that is not covered
///
/// Files are visited in evidence order and licenses in identifier order, so
/// the result is deterministic. A file no declaration matches at all is
/// reported the same way as a file whose matching declarations lack the
/// identifier.
#[must_use]
pub fn find_uncovered(declarations: &DeclarationSet, evidence: &EvidenceMap) -> Vec<Uncovered> {
    let mut uncovered = Vec::new();

    for file in evidence.values() {
        if file.detected_licenses.is_empty() || !is_subject_to_coverage(declarations, file) {
            continue;
        }

        let covered = covered_licenses(declarations, &file.path);
        for license in &file.detected_licenses {
            if covered.contains(license.as_str()) {
                continue;
            }
            uncovered.push(Uncovered {
                path: file.path.clone(),
                license: license.clone(),
                declared_as: declarations
                    .by_text_license(license)
                    .filter(|d| !d.covers(license))
                    .map(|d| d.identifier.clone()),
            });
        }
    }

    uncovered
}
