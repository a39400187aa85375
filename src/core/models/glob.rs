//! Glob patterns and declaration scopes
//!
//! A [`GlobPattern`] is a compiled shell-glob matched against package-relative,
//! `/`-separated paths:
//! - `*` and `?` never cross a `/`
//! - `**` as a whole path component matches any number of directories
//! - `[abc]` character classes
//!
//! A [`Scope`] is the set of files a license declaration covers, written as a
//! space-separated list of globs in the manifest.
//!
//! # Examples
//!
//! ```
//! use licheck::core::models::{GlobPattern, Scope};
//!
//! let pattern = GlobPattern::new("src/**/*.cpp").unwrap();
//! assert!(pattern.matches("src/a/b/main.cpp"));
//! assert!(!pattern.matches("include/main.hpp"));
//!
//! let scope = Scope::parse("src/*.cpp include/**").unwrap();
//! assert!(scope.matches("include/pkg/api.hpp"));
//! ```

use glob::{MatchOptions, Pattern};
use thiserror::Error;

/// Errors that can occur when compiling a glob
#[derive(Debug, Error)]
pub enum GlobError {
    /// Pattern string was empty
    #[error("empty glob pattern")]
    Empty,

    /// Invalid glob syntax
    #[error("invalid glob pattern '{pattern}': {reason}")]
    Invalid {
        /// The offending pattern
        pattern: String,
        /// What is wrong with it
        reason: String,
    },
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A compiled glob pattern
#[derive(Debug, Clone)]
pub struct GlobPattern {
    /// Pattern as written
    raw: String,

    /// Compiled matcher (normalized: no leading `./` or `/`)
    compiled: Pattern,
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for GlobPattern {}

impl GlobPattern {
    /// Compile a glob pattern
    pub fn new(pattern: &str) -> Result<Self, GlobError> {
        let raw = pattern.trim();
        if raw.is_empty() {
            return Err(GlobError::Empty);
        }

        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(GlobError::Empty);
        }

        let compiled = Pattern::new(&normalized).map_err(|e| GlobError::Invalid {
            pattern: raw.to_string(),
            reason: e.msg.to_string(),
        })?;

        Ok(Self {
            raw: raw.to_string(),
            compiled,
        })
    }

    /// The pattern as it was written
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the pattern was anchored to the root with a leading `/`
    #[must_use]
    pub fn is_anchored(&self) -> bool {
        self.raw.starts_with('/')
    }

    /// Whether the pattern contains a path separator (after normalization)
    #[must_use]
    pub fn has_separator(&self) -> bool {
        self.compiled.as_str().contains('/')
    }

    /// Check if a package-relative path matches this pattern
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.compiled.matches_with(&normalize_path(path), MATCH_OPTIONS)
    }
}

impl std::fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The files a license declaration applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    patterns: Vec<GlobPattern>,
}

impl Scope {
    /// Parse a space-separated list of globs
    pub fn parse(s: &str) -> Result<Self, GlobError> {
        let patterns = s.split_whitespace().map(GlobPattern::new).collect::<Result<Vec<_>, _>>()?;
        if patterns.is_empty() {
            return Err(GlobError::Empty);
        }
        Ok(Self { patterns })
    }

    /// A scope that matches no file at all
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// The individual patterns
    #[must_use]
    pub fn patterns(&self) -> &[GlobPattern] {
        &self.patterns
    }

    /// Check if any pattern of this scope matches the path
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<&str> = self.patterns.iter().map(GlobPattern::as_str).collect();
        f.write_str(&joined.join(" "))
    }
}

/// Strip `./` and `/` prefixes and unify separators
fn normalize(pattern: &str) -> String {
    let mut s = pattern.replace('\\', "/");
    while let Some(rest) = s.strip_prefix("./") {
        s = rest.to_string();
    }
    s.trim_start_matches('/').to_string()
}

/// Normalize a path the same way patterns are normalized
pub(crate) fn normalize_path(path: &str) -> String {
    normalize(path)
}
