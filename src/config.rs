//! Global configuration management
//!
//! Optional defaults for the policy flags and extra ignore patterns.
//! Config is read from `~/.licheck/config.toml` or from `--config <FILE>`.
//!
//! ```toml
//! [policy]
//! continue_on_error = false
//! warnings_as_error = true
//!
//! [scan]
//! ignore = ["*.png", "docs/**"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::models::Policy;
use crate::error::{LicheckError, Result};
use crate::paths;

/// Global licheck configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Policy defaults
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Scan settings
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Policy defaults, OR-ed with the command line flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Exit with success when checks fail with errors
    #[serde(default)]
    pub continue_on_error: bool,

    /// Treat warnings as errors
    #[serde(default)]
    pub warnings_as_error: bool,
}

/// Scan settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Patterns ignored in every package, on top of the built-in defaults
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Config {
    /// Get the default config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::global_config()
    }

    /// Load the configuration
    ///
    /// An explicit path must exist and parse. Without one the default file
    /// is used when present; a broken default file is logged and skipped.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        match Self::load_from(&path) {
            Ok(config) => Ok(config),
            Err(e) => {
                log::warn!("Ignoring {e}");
                Ok(Self::default())
            },
        }
    }

    /// Load a config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| LicheckError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::parse(&content).map_err(|reason| LicheckError::Config {
            path: path.to_path_buf(),
            reason,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config content
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Combine command line policy flags with the configured defaults
    #[must_use]
    pub const fn policy(&self, flags: Policy) -> Policy {
        Policy {
            continue_on_error: flags.continue_on_error || self.policy.continue_on_error,
            warnings_as_error: flags.warnings_as_error || self.policy.warnings_as_error,
        }
    }
}
