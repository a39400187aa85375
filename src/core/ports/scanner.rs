//! License scanner port
//!
//! Defines the interface to the engine that inspects file contents.

use std::collections::BTreeSet;
use std::path::Path;

use thiserror::Error;

/// Errors a scanner can report for a single file
#[derive(Debug, Error)]
pub enum ScanError {
    /// The file could not be read
    #[error("unreadable: {0}")]
    Io(#[from] std::io::Error),

    /// The file looks like binary content
    #[error("binary content")]
    Binary,

    /// The file is not valid UTF-8 text
    #[error("not valid UTF-8 text")]
    NotUtf8,
}

/// What a scanner found in one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileScan {
    /// Detected license identifiers
    pub licenses: BTreeSet<String>,

    /// Copyright statements in order of appearance
    pub copyrights: Vec<String>,

    /// Set when the file is the full text of this license
    pub license_text: Option<String>,
}

/// Scanner for license and copyright information
///
/// Implementations must be safe to call from several threads at once; the
/// scan adapter scans files in parallel.
pub trait LicenseScanner: Send + Sync {
    /// Scan one file
    fn scan_file(&self, path: &Path) -> Result<FileScan, ScanError>;
}
