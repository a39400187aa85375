//! Property-based tests for ignore sets and verdicts
//!
//! Uses proptest to verify properties that should hold for all inputs.

use licheck::core::models::{CheckResult, GlobPattern, IgnoreSet, Policy, Severity};
use licheck::core::services::{EXIT_OK, EXIT_WARNING, evaluate};
use proptest::prelude::*;

fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,6}", 1..5).prop_map(|parts| parts.join("/"))
}

fn pattern_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,4}",
        "\\*\\.[a-z]{1,3}",
        "[a-z]{1,4}/\\*",
        "[a-z]{1,4}/\\*\\*",
    ]
}

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![Just(Severity::Pass), Just(Severity::Warning), Just(Severity::Error)]
}

fn results(severities: &[Severity]) -> Vec<CheckResult> {
    severities
        .iter()
        .map(|s| match s {
            Severity::Pass => CheckResult::pass("c", "ok"),
            Severity::Warning => CheckResult::warning("c", "hmm"),
            Severity::Error => CheckResult::error("c", "bad"),
        })
        .collect()
}

proptest! {
    /// Adding patterns never brings an ignored path back
    #[test]
    fn ignore_is_monotonic(
        patterns in prop::collection::vec(pattern_strategy(), 0..4),
        extra in pattern_strategy(),
        path in path_strategy()
    ) {
        let base = IgnoreSet::new(&patterns).unwrap();
        let mut extended = base.clone();
        extended.push(&extra).unwrap();
        prop_assert!(!base.matches(&path) || extended.matches(&path));
    }

    /// The empty set ignores nothing
    #[test]
    fn empty_set_ignores_nothing(path in path_strategy()) {
        prop_assert!(!IgnoreSet::default().matches(&path));
    }

    /// A name pattern ignores the name at any depth
    #[test]
    fn extension_pattern_matches_at_any_depth(
        dir in path_strategy(),
        name in "[a-z]{1,8}",
        ext in "[a-z]{1,3}"
    ) {
        let set = IgnoreSet::new([format!("*.{ext}")]).unwrap();
        let nested = format!("{dir}/{name}.{ext}");
        let top = format!("{name}.{ext}");
        prop_assert!(set.matches(&nested));
        prop_assert!(set.matches(&top));
    }

    /// An ignored directory ignores every file below it
    #[test]
    fn ignored_directory_ignores_contents(
        dir in "[a-z]{1,6}",
        rest in path_strategy()
    ) {
        let set = IgnoreSet::new([dir.as_str()]).unwrap();
        let path = format!("{dir}/{rest}");
        prop_assert!(set.matches(&path));
    }

    /// A literal path matches itself
    #[test]
    fn literal_path_matches_self(path in path_strategy()) {
        prop_assert!(GlobPattern::new(&path).unwrap().matches(&path));
    }

    /// The overall severity is the maximum, promotion aside
    #[test]
    fn verdict_is_maximum(severities in prop::collection::vec(severity_strategy(), 0..8)) {
        let verdict = evaluate(&results(&severities), Policy::default());
        let max = severities.iter().copied().max().unwrap_or_default();
        prop_assert_eq!(verdict.overall_severity, max);
    }

    /// Suppression turns an error into success and leaves other exit codes alone
    #[test]
    fn continue_on_error_only_suppresses_errors(
        severities in prop::collection::vec(severity_strategy(), 0..8),
        warnings_as_error in any::<bool>()
    ) {
        let strict = Policy { continue_on_error: false, warnings_as_error };
        let lenient = Policy { continue_on_error: true, warnings_as_error };
        let before = evaluate(&results(&severities), strict);
        let after = evaluate(&results(&severities), lenient);
        prop_assert_eq!(after.overall_severity, before.overall_severity);
        if before.overall_severity == Severity::Error {
            prop_assert_eq!(after.exit_code, EXIT_OK);
        } else {
            prop_assert_eq!(after.exit_code, before.exit_code);
        }
    }

    /// Promotion leaves no warning exit code
    #[test]
    fn warnings_as_error_never_warns(severities in prop::collection::vec(severity_strategy(), 0..8)) {
        let policy = Policy { continue_on_error: false, warnings_as_error: true };
        let verdict = evaluate(&results(&severities), policy);
        prop_assert_ne!(verdict.exit_code, EXIT_WARNING);
        prop_assert_ne!(verdict.overall_severity, Severity::Warning);
    }
}
