//! Check results and verdicts

use serde::Serialize;

use super::Severity;

/// Outcome of one check on one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Name of the check that produced this result
    pub check_name: String,

    /// Outcome severity
    pub severity: Severity,

    /// One-line explanation
    pub message: String,

    /// Files the result is about, in report order
    pub evidence_paths: Vec<String>,

    /// Additional lines for verbose output
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl CheckResult {
    /// A passing result
    #[must_use]
    pub fn pass(check_name: &str, message: impl Into<String>) -> Self {
        Self::new(check_name, Severity::Pass, message)
    }

    /// A warning result
    #[must_use]
    pub fn warning(check_name: &str, message: impl Into<String>) -> Self {
        Self::new(check_name, Severity::Warning, message)
    }

    /// An error result
    #[must_use]
    pub fn error(check_name: &str, message: impl Into<String>) -> Self {
        Self::new(check_name, Severity::Error, message)
    }

    fn new(check_name: &str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            check_name: check_name.to_string(),
            severity,
            message: message.into(),
            evidence_paths: Vec::new(),
            details: Vec::new(),
        }
    }

    /// Attach the files this result is about
    #[must_use]
    pub fn with_paths(mut self, paths: Vec<String>) -> Self {
        self.evidence_paths = paths;
        self
    }

    /// Attach verbose detail lines
    #[must_use]
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// Whether the check passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.severity == Severity::Pass
    }
}

/// Aggregated outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Highest severity after policy promotion
    pub overall_severity: Severity,

    /// Process exit code
    pub exit_code: i32,
}

/// Severity policy flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Policy {
    /// Exit with success even when checks fail
    pub continue_on_error: bool,

    /// Treat warnings as errors
    pub warnings_as_error: bool,
}
