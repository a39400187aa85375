//! Scan evidence
//!
//! What the scanner found in each file of a package.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Scan output for one non-ignored file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileEvidence {
    /// Path relative to the package root, `/`-separated
    pub path: String,

    /// License identifiers detected in the file
    pub detected_licenses: BTreeSet<String>,

    /// Copyright statements, deduplicated, in order of appearance
    pub copyright_lines: Vec<String>,

    /// Set when the whole file is the text of this license
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_text: Option<String>,

    /// Why the file could not be scanned, if it could not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl FileEvidence {
    /// A scanned file without detections
    #[must_use]
    pub fn empty(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// A file the scanner could not process
    #[must_use]
    pub fn unscannable(path: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            note: Some(note.into()),
            ..Self::default()
        }
    }
}

/// Evidence for all scanned files, keyed and ordered by path
pub type EvidenceMap = BTreeMap<String, FileEvidence>;
