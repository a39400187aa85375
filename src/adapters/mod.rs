//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `spdx` - Built-in SPDX license list ([`LicenseCatalog`](crate::core::ports::LicenseCatalog))
//! - `heuristic` - Marker and SPDX-tag scanner ([`LicenseScanner`](crate::core::ports::LicenseScanner))
//! - `walker` - Parallel package tree scan
//! - `manifest` - `package.xml` reading
//! - `git` - Enclosing repository lookup

pub mod git;
pub mod heuristic;
pub mod manifest;
pub mod spdx;
pub mod walker;

pub use heuristic::HeuristicScanner;
pub use manifest::{ManifestError, read_manifest};
pub use spdx::BuiltinCatalog;
pub use walker::{ScanOutcome, WalkError, scan};
