//! Centralized path definitions for licheck
//!
//! This module provides a single source of truth for all file names and
//! filesystem paths used by licheck.
//!
//! ## Package Layout
//!
//! ```text
//! my_pkg/
//! ├── package.xml        # Manifest with the <license> declarations
//! ├── .scanignore        # Optional extra ignore patterns
//! ├── LICENSE            # License text(s)
//! └── copyright          # Written with --generate_copyright_file
//! ```
//!
//! ### Global (User-Level)
//!
//! ```text
//! ~/.licheck/
//! └── config.toml        # Policy defaults and extra ignore patterns
//! ```

use std::path::{Path, PathBuf};

// =============================================================================
// Package-level paths
// =============================================================================

/// Manifest filename; its presence makes a directory a package
pub const MANIFEST_FILE: &str = "package.xml";

/// Per-package ignore file
pub const IGNORE_FILE: &str = ".scanignore";

/// Generated copyright file
pub const COPYRIGHT_FILE: &str = "copyright";

/// Patterns every package ignores
pub const DEFAULT_IGNORE_PATTERNS: [&str; 7] = [
    IGNORE_FILE,
    MANIFEST_FILE,
    "CMakeLists.txt",
    "setup.py",
    "setup.cfg",
    COPYRIGHT_FILE,
    ".git",
];

/// Marker files that exclude a directory tree from package discovery
pub const PACKAGE_IGNORE_MARKERS: [&str; 3] = ["COLCON_IGNORE", "CATKIN_IGNORE", "AMENT_IGNORE"];

/// Get path to the manifest of a package
#[must_use]
pub fn manifest(package_root: &Path) -> PathBuf {
    package_root.join(MANIFEST_FILE)
}

/// Get path to the ignore file of a package
#[must_use]
pub fn ignore_file(package_root: &Path) -> PathBuf {
    package_root.join(IGNORE_FILE)
}

/// Get path to the generated copyright file of a package
#[must_use]
pub fn copyright_file(package_root: &Path) -> PathBuf {
    package_root.join(COPYRIGHT_FILE)
}

// =============================================================================
// Global paths (user-level)
// =============================================================================

/// Global config directory name
const GLOBAL_DIR: &str = ".licheck";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global licheck directory.
///
/// Returns `~/.licheck/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.licheck/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
