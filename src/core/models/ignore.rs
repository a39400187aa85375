//! Ignore set
//!
//! Paths excluded from scanning. Built from the default patterns plus the
//! user patterns of a package's `.scanignore` file. Matching is a boolean OR
//! over all patterns, with gitignore-like conveniences:
//! - a pattern without `/` is matched against every path component
//! - a pattern matching a directory ignores everything below it
//! - a trailing `/` only matches directories

use super::glob::{GlobError, GlobPattern, normalize_path};

/// One entry of an ignore set
#[derive(Debug, Clone, PartialEq, Eq)]
struct IgnorePattern {
    glob: GlobPattern,
    dir_only: bool,
}

/// Ordered set of ignore patterns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    patterns: Vec<IgnorePattern>,
}

impl IgnoreSet {
    /// Create an ignore set from patterns, failing on the first invalid one
    pub fn new<I, S>(patterns: I) -> Result<Self, GlobError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for p in patterns {
            set.push(p.as_ref())?;
        }
        Ok(set)
    }

    /// Append a pattern
    pub fn push(&mut self, pattern: &str) -> Result<(), GlobError> {
        let trimmed = pattern.trim();
        let dir_only = trimmed.len() > 1 && trimmed.ends_with('/');
        let glob = GlobPattern::new(trimmed.trim_end_matches('/'))?;
        self.patterns.push(IgnorePattern { glob, dir_only });
        Ok(())
    }

    /// Append every pattern of an ignore file's content
    ///
    /// Blank lines and `#` comments are skipped. Invalid patterns are logged
    /// and skipped so one typo does not disable the whole file.
    pub fn extend_from_content(&mut self, content: &str) {
        for line in parse_ignore_lines(content) {
            if let Err(e) = self.push(line) {
                log::warn!("Skipping ignore pattern '{line}': {e}");
            }
        }
    }

    /// Number of patterns in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set has no patterns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The patterns as written, in order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.glob.as_str())
    }

    /// Check if a package-relative file path is ignored
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.patterns.iter().any(|p| p.matches_file(&path))
    }

    /// Check if a package-relative directory is ignored as a whole
    #[must_use]
    pub fn matches_dir(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.patterns.iter().any(|p| p.matches_dir(&path))
    }
}

impl IgnorePattern {
    fn matches_file(&self, path: &str) -> bool {
        let components: Vec<&str> = path.split('/').collect();
        let (dirs, _file) = components.split_at(components.len().saturating_sub(1));

        // Any ancestor directory ignored means the file is ignored
        for depth in 1..=dirs.len() {
            if self.matches_dir(&components[..depth].join("/")) {
                return true;
            }
        }

        !self.dir_only && self.matches_entry(path)
    }

    fn matches_dir(&self, dir: &str) -> bool {
        self.matches_entry(dir)
    }

    fn matches_entry(&self, path: &str) -> bool {
        if self.glob.matches(path) {
            return true;
        }
        if self.glob.has_separator() || self.glob.is_anchored() {
            return false;
        }
        path.rsplit('/').next().is_some_and(|name| self.glob.matches(name))
    }
}

/// Yield the pattern lines of an ignore file
pub fn parse_ignore_lines(content: &str) -> impl Iterator<Item = &str> {
    content.lines().map(str::trim).filter(|l| !l.is_empty() && !l.starts_with('#'))
}
