//! Heuristic license scanner
//!
//! Detects licenses from `SPDX-License-Identifier` tags and from marker
//! phrases of the built-in catalog, and collects copyright statements.
//!
//! A file is classified as a license text only when it is license prose
//! throughout: no SPDX tag, the license's markers start outside of a
//! comment, no line carries code syntax, and nearly every line reads as
//! prose. Source files quoting a license header stay source files.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use regex::Regex;

use crate::adapters::spdx::{BuiltinCatalog, LicenseMarkers, MARKERS};
use crate::core::ports::{FileScan, LicenseCatalog, LicenseScanner, ScanError};

/// Bytes inspected for NUL when deciding whether a file is binary
const BINARY_SNIFF_LEN: usize = 8 * 1024;

const COMMENT_PREFIXES: [&str; 10] = ["<!--", "/*", "//", "--", "..", "#", "*", ";", "%", "!"];

const COMMENT_SUFFIXES: [&str; 2] = ["*/", "-->"];

/// Fragments that never occur in license prose
const CODE_TOKENS: [&str; 11] = [
    "\"\"\"", "'''", "{", "}", " = ", "==", "=>", "->", "::", "#include", "#!",
];

/// Share of non-blank lines, in tenths, that must read as prose
const PROSE_TENTHS: usize = 9;

/// Every distinct marker phrase, indexed like the automaton's patterns
static PHRASES: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut phrases: Vec<&'static str> = Vec::new();
    for phrase in MARKERS.iter().flat_map(|entry| entry.markers.iter().copied()) {
        if !phrases.contains(&phrase) {
            phrases.push(phrase);
        }
    }
    phrases
});

static PHRASE_MATCHER: LazyLock<AhoCorasick> =
    LazyLock::new(|| AhoCorasick::new(PHRASES.iter().copied()).expect("valid marker phrases"));

static SPDX_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SPDX-License-Identifier:\s*(?P<expr>.+)$").expect("valid regex"));

static SPDX_COPYRIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SPDX-FileCopyrightText:\s*(?P<rest>.+)$").expect("valid regex"));

static COPYRIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bcopyright\b\s*:?\s*(?P<sym>(?:(?:\(c\)|©)\s*)*)(?P<rest>.*)$").expect("valid regex")
});

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:19|20)\d{2}\b").expect("valid regex"));

/// Scanner working on marker phrases and SPDX tags
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScanner {
    catalog: BuiltinCatalog,
}

impl HeuristicScanner {
    /// Create a scanner backed by the built-in catalog
    #[must_use]
    pub const fn new() -> Self {
        Self {
            catalog: BuiltinCatalog::new(),
        }
    }

    /// Scan text content
    #[must_use]
    pub fn scan_text(&self, text: &str) -> FileScan {
        let tagged: BTreeSet<String> = text
            .lines()
            .filter_map(|line| SPDX_TAG_RE.captures(line))
            .flat_map(|caps| parse_spdx_expression(strip_comment(&caps["expr"])))
            .map(|id| self.catalog.resolve(&id).unwrap_or(id))
            .collect();

        let normalized = NormalizedText::new(text);
        let hits = reduce_families(find_hits(&normalized));

        // A tagged file is source code, however much license text it quotes
        let license_text = if tagged.is_empty() && is_prose(text) {
            hits.iter()
                .min_by_key(|h| (std::cmp::Reverse(h.entry.markers.len()), h.first_pos))
                .filter(|h| {
                    text.lines()
                        .nth(normalized.line_of(h.first_pos))
                        .is_some_and(|line| !is_comment_line(line))
                })
                .map(|h| h.entry.id.to_string())
        } else {
            None
        };

        let mut licenses = tagged;
        licenses.extend(hits.iter().map(|h| h.entry.id.to_string()));

        FileScan {
            licenses,
            copyrights: find_copyrights(text),
            license_text,
        }
    }
}

impl LicenseScanner for HeuristicScanner {
    fn scan_file(&self, path: &Path) -> Result<FileScan, ScanError> {
        let bytes = fs::read(path)?;
        if bytes.iter().take(BINARY_SNIFF_LEN).any(|b| *b == 0) {
            return Err(ScanError::Binary);
        }
        let text = String::from_utf8(bytes).map_err(|_| ScanError::NotUtf8)?;
        Ok(self.scan_text(&text))
    }
}

/// Identifiers of an SPDX license expression
///
/// `AND`/`OR` and parentheses are dropped, as is the exception following
/// `WITH`.
#[must_use]
pub fn parse_spdx_expression(expr: &str) -> Vec<String> {
    let spaced = expr.replace('(', " ( ").replace(')', " ) ");
    let mut ids = Vec::new();
    let mut skip_exception = false;

    for token in spaced.split_whitespace() {
        if skip_exception {
            skip_exception = false;
            continue;
        }
        match token {
            "(" | ")" => {},
            t if t.eq_ignore_ascii_case("and") || t.eq_ignore_ascii_case("or") => {},
            t if t.eq_ignore_ascii_case("with") => skip_exception = true,
            t => {
                let id = t.trim_matches(|c| matches!(c, '"' | '\'' | ',' | ';'));
                if !id.is_empty() {
                    ids.push(id.to_string());
                }
            },
        }
    }

    ids
}

/// Whether a line starts with a comment marker
#[must_use]
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    COMMENT_PREFIXES.iter().any(|p| trimmed.starts_with(p))
}

/// Whether a text reads as license prose rather than code or notes
///
/// No line may carry code syntax, and at least nine in ten non-blank lines
/// must be mostly letters and digits.
#[must_use]
pub fn is_prose(text: &str) -> bool {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() || lines.iter().any(|l| CODE_TOKENS.iter().any(|t| l.contains(t))) {
        return false;
    }
    let prose = lines.iter().filter(|l| is_prose_line(l)).count();
    prose * 10 >= lines.len() * PROSE_TENTHS
}

fn is_prose_line(line: &str) -> bool {
    let visible: Vec<char> = strip_comment(line).chars().filter(|c| !c.is_whitespace()).collect();
    let words = visible.iter().filter(|c| c.is_alphanumeric()).count();
    !visible.is_empty() && words * 5 >= visible.len() * 3
}

/// Strip comment markers around a line's content
fn strip_comment(line: &str) -> &str {
    let mut s = line.trim();
    while let Some(rest) = COMMENT_PREFIXES.iter().find_map(|p| s.strip_prefix(p)) {
        s = rest.trim_start();
    }
    while let Some(rest) = COMMENT_SUFFIXES.iter().find_map(|p| s.strip_suffix(p)) {
        s = rest.trim_end();
    }
    s
}

/// Lower-cased text with comment markers removed and whitespace collapsed,
/// remembering where each source line starts
struct NormalizedText {
    text: String,
    line_starts: Vec<usize>,
}

impl NormalizedText {
    fn new(raw: &str) -> Self {
        let mut text = String::with_capacity(raw.len());
        let mut line_starts = Vec::new();
        for line in raw.lines() {
            line_starts.push(text.len());
            for word in strip_comment(line).split_whitespace() {
                text.push_str(&word.to_lowercase());
                text.push(' ');
            }
        }
        Self { text, line_starts }
    }

    /// First position of every marker phrase, indexed like [`PHRASES`]
    fn first_positions(&self) -> Vec<Option<usize>> {
        let mut first = vec![None; PHRASES.len()];
        // Overlapping, so "version 2" does not hide "version 2.1"
        for m in PHRASE_MATCHER.find_overlapping_iter(self.text.as_str()) {
            let slot = &mut first[m.pattern().as_usize()];
            if slot.is_none() {
                *slot = Some(m.start());
            }
        }
        first
    }

    /// Index of the source line containing a position of the normalized text
    fn line_of(&self, pos: usize) -> usize {
        self.line_starts.partition_point(|start| *start <= pos).saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy)]
struct Hit {
    entry: &'static LicenseMarkers,
    first_pos: usize,
}

fn find_hits(text: &NormalizedText) -> Vec<Hit> {
    let first = text.first_positions();
    let position = |phrase: &str| PHRASES.iter().position(|p| *p == phrase).and_then(|i| first[i]);

    MARKERS
        .iter()
        .filter_map(|entry| {
            let positions: Option<Vec<usize>> =
                entry.markers.iter().map(|&m| position(m)).collect();
            positions.and_then(|p| p.first().copied()).map(|first_pos| Hit { entry, first_pos })
        })
        .collect()
}

/// Keep one license per family: the one whose text starts first, then the
/// one with the most markers
fn reduce_families(hits: Vec<Hit>) -> Vec<Hit> {
    let mut kept: Vec<Hit> = Vec::new();
    for hit in hits {
        let Some(family) = hit.entry.family else {
            kept.push(hit);
            continue;
        };
        match kept.iter_mut().find(|k| k.entry.family == Some(family)) {
            Some(existing) => {
                let better = (hit.first_pos, std::cmp::Reverse(hit.entry.markers.len()))
                    < (existing.first_pos, std::cmp::Reverse(existing.entry.markers.len()));
                if better {
                    *existing = hit;
                }
            },
            None => kept.push(hit),
        }
    }
    kept
}

/// Copyright statements of a text, deduplicated, in order of appearance
fn find_copyrights(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for line in text.lines() {
        let content = strip_comment(line);
        let statement = SPDX_COPYRIGHT_RE
            .captures(content)
            .map(|caps| clean_statement(&caps["rest"]))
            .or_else(|| {
                COPYRIGHT_RE.captures(content).and_then(|caps| {
                    let rest = caps["rest"].trim();
                    let has_symbol = !caps["sym"].trim().is_empty();
                    (has_symbol || YEAR_RE.is_match(rest)).then(|| clean_statement(rest))
                })
            });

        if let Some(s) = statement.filter(|s| is_statement(s)) {
            if !found.contains(&s) {
                found.push(s);
            }
        }
    }
    found
}

fn clean_statement(rest: &str) -> String {
    let words: Vec<&str> = strip_comment(rest).split_whitespace().collect();
    let joined = words.join(" ");
    let lowered = joined.to_lowercase();
    for prefix in ["copyright (c) ", "copyright © ", "copyright "] {
        if lowered.starts_with(prefix) {
            return joined[prefix.len()..].to_string();
        }
    }
    joined
}

/// Rejects empty statements and license-template placeholders
fn is_statement(s: &str) -> bool {
    !s.is_empty() && !s.starts_with(['<', '['])
}
