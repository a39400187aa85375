//! Core domain logic for licheck
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (`LicenseDeclaration`, `FileEvidence`, `CheckResult`, `Severity`)
//! - `services/` - Checks, coverage matching, aggregation, copyright rendering
//! - `ports/` - Trait definitions for the scanner and the SPDX catalog

pub mod models;
pub mod ports;
pub mod services;
