//! Check severity levels
//!
//! Defines how serious a check outcome is. Severities are totally ordered
//! (`Pass < Warning < Error`) so aggregating many outcomes is a `max`.

use serde::{Deserialize, Serialize};

/// Outcome severity of a check
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The check found nothing to report
    #[default]
    Pass,
    /// Something is off but the package may still be compliant
    Warning,
    /// A compliance violation
    Error,
}

impl Severity {
    /// Upper-case label used in reports
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    /// Promote a warning to an error, leaving other severities untouched
    #[must_use]
    pub const fn escalated(self) -> Self {
        match self {
            Self::Warning => Self::Error,
            other => other,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
