//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::core::models::{CheckResult, Policy, Severity, Verdict};
use crate::core::services::aggregator::is_suppressed;
use crate::pipeline::PackageReport;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// How much human output to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Only failing checks and the verdict
    Quiet,
    /// Every check
    #[default]
    Normal,
    /// Every check with details and affected files
    Verbose,
}

/// Result of a whole run
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// When the report was produced
    pub generated_at: DateTime<Utc>,

    /// Policy flags in effect
    pub policy: Policy,

    /// One report per package
    pub packages: Vec<PackageReport>,

    /// Aggregated outcome
    pub verdict: Verdict,
}

impl RunReport {
    /// Create a report stamped with the current time
    #[must_use]
    pub fn new(packages: Vec<PackageReport>, policy: Policy, verdict: Verdict) -> Self {
        Self {
            generated_at: Utc::now(),
            policy,
            packages,
            verdict,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode, verbosity: Verbosity) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human(verbosity)),
            OutputMode::Json => self.render_json(),
        }
    }

    /// Human-readable report text
    #[must_use]
    pub fn to_human(&self, verbosity: Verbosity) -> String {
        let mut out = String::new();
        for package in &self.packages {
            out.push_str(&format!("{}\n", format!("[{}]", package.name).bold()));
            if verbosity == Verbosity::Verbose {
                out.push_str(&format!(
                    "  {} ({} files scanned)\n",
                    package.path.display(),
                    package.files_scanned
                ));
            }
            for result in &package.results {
                if verbosity == Verbosity::Quiet && result.passed() {
                    continue;
                }
                out.push_str(&render_result(result, verbosity));
            }
            if let Some(path) = &package.copyright_file {
                out.push_str(&format!("  Wrote {}\n", path.display()));
            }
            out.push('\n');
        }

        let severity = self.verdict.overall_severity;
        out.push_str(&format!("Overall: {}", colored_label(severity)));
        if is_suppressed(severity, self.policy) {
            out.push_str(" (ignored, --continue_on_error)");
        }
        out.push('\n');
        out
    }

    fn render_json(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize the report: {e}"),
        }
    }
}

fn render_result(result: &CheckResult, verbosity: Verbosity) -> String {
    let mut out = format!("  {} {}\n", colored_label(result.severity), result.check_name);
    for line in result.message.lines() {
        out.push_str(&format!("      {line}\n"));
    }
    if verbosity == Verbosity::Verbose {
        for path in &result.evidence_paths {
            out.push_str(&format!("      {} {path}\n", "file:".dimmed()));
        }
        for detail in &result.details {
            out.push_str(&format!("      {}\n", detail.dimmed()));
        }
    }
    out
}

fn colored_label(severity: Severity) -> String {
    let label = format!("{:<7}", severity.label());
    match severity {
        Severity::Pass => label.green().to_string(),
        Severity::Warning => label.yellow().to_string(),
        Severity::Error => label.red().bold().to_string(),
    }
}
