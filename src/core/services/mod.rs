//! Business logic services
//!
//! Pure orchestration logic that operates on domain models.
//! These services have no I/O dependencies - they operate on
//! data passed in and return results.
//!
//! - [`checks`] - The compliance checks
//! - [`coverage`] - Match detected licenses to declaration scopes
//! - [`schema`] - Structural manifest validation
//! - [`aggregator`] - Reduce results to an exit code
//! - [`copyright`] - Assemble copyright notices

pub mod aggregator;
pub mod checks;
pub mod copyright;
pub mod coverage;
pub mod schema;

pub use aggregator::{EXIT_ERROR, EXIT_OK, EXIT_USAGE, EXIT_WARNING, evaluate};
pub use checks::{Check, run_checks};
pub use copyright::{CopyrightHeader, DEBIAN_FORMAT, collect_copyrights, render_copyright_file};
pub use coverage::{Uncovered, find_uncovered};
pub use schema::validate_manifest;
