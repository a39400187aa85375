//! Error types for licheck
//!
//! Input errors abort a run before any check is evaluated. Compliance
//! problems are never errors; they are reported as check results.

use std::path::PathBuf;

use thiserror::Error;

use crate::adapters::{ManifestError, WalkError};

/// Errors that stop a run
#[derive(Debug, Error)]
pub enum LicheckError {
    /// The given path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// No package manifest below the given path
    #[error("no packages found in {0}")]
    NoPackages(PathBuf),

    /// A manifest could not be read or is not XML
    #[error("invalid manifest in {package}: {source}")]
    Manifest {
        /// Package root
        package: PathBuf,
        /// Underlying error
        #[source]
        source: ManifestError,
    },

    /// The package tree could not be walked
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// The configuration file could not be used
    #[error("invalid config {path}: {reason}")]
    Config {
        /// Config file path
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Any other I/O failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for licheck operations
pub type Result<T> = std::result::Result<T, LicheckError>;
