//! Copyright notice assembly
//!
//! Produces a Debian machine-readable copyright file from declarations and
//! the copyright statements found by the scan.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::core::models::{DeclarationSet, EvidenceMap, FileEvidence};

/// Header line of the Debian copyright format
pub const DEBIAN_FORMAT: &str = "https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/";

/// Copyright statements across files, first-seen order, exact duplicates dropped
#[must_use]
pub fn collect_copyrights<'a>(evidence: impl IntoIterator<Item = &'a FileEvidence>) -> Vec<String> {
    let mut seen = HashSet::new();
    evidence
        .into_iter()
        .flat_map(|e| e.copyright_lines.iter().map(String::as_str))
        .filter(|line| seen.insert(*line))
        .map(str::to_string)
        .collect()
}

/// Package information for the copyright header
#[derive(Debug, Clone, Copy)]
pub struct CopyrightHeader<'a> {
    /// Package name
    pub upstream_name: &'a str,

    /// Repository URL, when known
    pub source: Option<&'a str>,
}

/// Render the copyright file of a package
///
/// One stanza per declaration. `read_text` returns the content of a license
/// text file given its package-relative path; a declaration without a
/// readable text gets the `License:` line only.
#[must_use]
pub fn render_copyright_file(
    header: CopyrightHeader<'_>,
    declarations: &DeclarationSet,
    evidence: &EvidenceMap,
    read_text: impl Fn(&str) -> Option<String>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Format: {DEBIAN_FORMAT}");
    let _ = writeln!(out, "Upstream-Name: {}", header.upstream_name);
    if let Some(source) = header.source {
        let _ = writeln!(out, "Source: {source}");
    }

    for decl in declarations {
        let copyrights =
            collect_copyrights(evidence.values().filter(|e| decl.applies_to(&e.path)));

        let _ = writeln!(out);
        let _ = writeln!(out, "Files: {}", decl.scope_str());
        let _ = writeln!(out, "Copyright: {}", copyrights.join("\n           "));
        let _ = writeln!(out, "License: {}", decl.identifier);

        let text = decl.license_file.as_deref().and_then(&read_text);
        if text.is_none() {
            log::debug!("No license text to embed for '{}'", decl.identifier);
        }
        for line in text.iter().flat_map(|t| t.lines()) {
            if line.trim().is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, " {line}");
            }
        }
    }

    out
}
