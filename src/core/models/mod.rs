//! Domain models for licheck
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`LicenseDeclaration`] - "These files are under this license"
//! - [`FileEvidence`] - "The scanner found this in that file"
//! - [`CheckResult`] - "This rule passed, warned or failed"
//! - [`Severity`] - Totally ordered outcome level
//! - [`IgnoreSet`] / [`GlobPattern`] - Path matching

mod check_result;
mod context;
mod declaration;
mod evidence;
mod glob;
mod ignore;
mod manifest;
mod severity;

pub use check_result::{CheckResult, Policy, Verdict};
pub use context::PackageContext;
pub use declaration::{DeclarationSet, LicenseDeclaration, LicenseTexts};
pub use evidence::{EvidenceMap, FileEvidence};
pub use glob::{GlobError, GlobPattern, Scope};
pub use ignore::{IgnoreSet, parse_ignore_lines};
pub use manifest::{LicenseTag, Maintainer, PackageManifest};
pub use severity::Severity;
