//! Git repository lookup
//!
//! Packages usually live inside a git repository. The repository root may
//! carry the license text for all of its packages, and its remote URL is
//! the `Source` of the generated copyright file.

use std::path::{Path, PathBuf};

/// What licheck wants to know about the enclosing repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    /// Work tree root
    pub root: PathBuf,

    /// URL of the `origin` remote, or of the first remote
    pub remote_url: Option<String>,
}

/// Find the repository containing `path`
///
/// Returns `None` outside of a repository and for bare repositories.
#[must_use]
pub fn discover(path: &Path) -> Option<RepoInfo> {
    let repo = git2::Repository::discover(path).ok()?;
    let root = repo.workdir()?.to_path_buf();
    let root = root.canonicalize().unwrap_or(root);

    let remote_url = repo
        .find_remote("origin")
        .ok()
        .and_then(|r| r.url().map(String::from))
        .or_else(|| {
            let names = repo.remotes().ok()?;
            let first = names.iter().flatten().next()?.to_string();
            repo.find_remote(&first).ok()?.url().map(String::from)
        });

    log::debug!("Package is in git repository {}", root.display());
    Some(RepoInfo {
        root,
        remote_url,
    })
}
