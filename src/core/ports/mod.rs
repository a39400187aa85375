//! Port traits (interfaces) for external collaborators
//!
//! The check engine depends only on these traits, never on the concrete
//! scanner or license list. Implementations live in the `adapters` module.

mod catalog;
mod scanner;

pub use catalog::LicenseCatalog;
pub use scanner::{FileScan, LicenseScanner, ScanError};
