//! Everything the checks know about one package

use std::collections::BTreeSet;

use super::{DeclarationSet, EvidenceMap, LicenseTexts, PackageManifest};

/// Inputs of the check engine for one package
///
/// Built once per package after scanning; checks only read it.
#[derive(Debug, Clone, Default)]
pub struct PackageContext {
    /// Package name (manifest name, or directory name)
    pub name: String,

    /// Parsed manifest
    pub manifest: PackageManifest,

    /// Resolved license declarations
    pub declarations: DeclarationSet,

    /// Scan evidence for every non-ignored file
    pub evidence: EvidenceMap,

    /// Every file below the package root, ignored or not
    pub all_files: BTreeSet<String>,

    /// License text files in the package and at the repository root
    pub license_texts: LicenseTexts,
}

impl PackageContext {
    /// Whether a package-relative path exists (`../` paths are repository files)
    #[must_use]
    pub fn file_exists(&self, path: &str) -> bool {
        self.all_files.contains(path) || self.license_texts.contains_key(path)
    }

    /// Whether a path was scanned
    #[must_use]
    pub fn was_scanned(&self, path: &str) -> bool {
        self.evidence.contains_key(path) || self.license_texts.contains_key(path)
    }
}
