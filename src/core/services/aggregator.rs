//! Aggregation of check results into a process verdict

use crate::core::models::{CheckResult, Policy, Severity, Verdict};

/// Every check passed, or failures were suppressed
pub const EXIT_OK: i32 = 0;

/// The worst result is a warning
pub const EXIT_WARNING: i32 = 1;

/// The worst result is an error
pub const EXIT_ERROR: i32 = 2;

/// The input could not be processed (sysexits `EX_USAGE`)
pub const EXIT_USAGE: i32 = 64;

/// Reduce check results to an overall severity and exit code
///
/// Warnings are promoted before the reduction when `warnings_as_error` is
/// set. `continue_on_error` then turns an ERROR verdict into a zero exit
/// code while keeping the overall severity as is; a WARNING verdict keeps
/// its own exit code.
#[must_use]
pub fn evaluate<'a>(results: impl IntoIterator<Item = &'a CheckResult>, policy: Policy) -> Verdict {
    let overall_severity = results
        .into_iter()
        .map(|r| effective_severity(r.severity, policy))
        .max()
        .unwrap_or_default();

    let exit_code = if is_suppressed(overall_severity, policy) {
        EXIT_OK
    } else {
        exit_code_for(overall_severity)
    };

    Verdict {
        overall_severity,
        exit_code,
    }
}

/// Severity of a single result under a policy
#[must_use]
pub const fn effective_severity(severity: Severity, policy: Policy) -> Severity {
    if policy.warnings_as_error {
        severity.escalated()
    } else {
        severity
    }
}

/// Whether `continue_on_error` suppresses the exit code of this severity
#[must_use]
pub fn is_suppressed(overall_severity: Severity, policy: Policy) -> bool {
    policy.continue_on_error && overall_severity == Severity::Error
}

/// Exit code for an overall severity, without suppression
#[must_use]
pub const fn exit_code_for(severity: Severity) -> i32 {
    match severity {
        Severity::Pass => EXIT_OK,
        Severity::Warning => EXIT_WARNING,
        Severity::Error => EXIT_ERROR,
    }
}
