//! Structural validation of package manifests

use std::sync::LazyLock;

use regex::Regex;

use crate::core::models::PackageManifest;

/// Highest manifest format this validator knows
pub const MAX_FORMAT: u32 = 4;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("valid regex"));

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("valid regex"));

const LICENSE_ATTRIBUTES: [&str; 2] = ["file", "source-files"];

/// Validate a manifest's structure
///
/// Returns every problem found, in document order of the checked elements.
/// An empty list means the manifest is valid.
#[must_use]
pub fn validate_manifest(manifest: &PackageManifest) -> Vec<String> {
    let mut problems = Vec::new();

    if manifest.root != "package" {
        problems.push(format!("root element is <{}>, expected <package>", manifest.root));
    }

    match manifest.format_version() {
        Some(v) if (1..=MAX_FORMAT).contains(&v) => {},
        _ => problems.push(format!(
            "unsupported package format '{}' (use e.g. <package format=\"3\">)",
            manifest.format.as_deref().unwrap_or_default()
        )),
    }

    match manifest.names.as_slice() {
        [] => problems.push("missing <name>".to_string()),
        [name] if !NAME_RE.is_match(name) => {
            problems.push(format!("invalid package name '{name}'"));
        },
        [_] => {},
        _ => problems.push("more than one <name>".to_string()),
    }

    match manifest.versions.as_slice() {
        [] => problems.push("missing <version>".to_string()),
        [version] if !VERSION_RE.is_match(version) => {
            problems.push(format!("invalid version '{version}', expected MAJOR.MINOR.PATCH"));
        },
        [_] => {},
        _ => problems.push("more than one <version>".to_string()),
    }

    match manifest.descriptions.as_slice() {
        [] => problems.push("missing <description>".to_string()),
        [d] if d.trim().is_empty() => problems.push("empty <description>".to_string()),
        [_] => {},
        _ => problems.push("more than one <description>".to_string()),
    }

    if manifest.maintainers.is_empty() {
        problems.push("missing <maintainer>".to_string());
    }
    for m in manifest.maintainers.iter().filter(|m| m.email.as_deref().is_none_or(str::is_empty)) {
        problems.push(format!("<maintainer> '{}' has no email attribute", m.name));
    }

    for (i, license) in manifest.licenses.iter().enumerate() {
        if license.text.trim().is_empty() {
            problems.push(format!("<license> #{} is empty", i + 1));
        }
        for attr in &license.unknown_attributes {
            problems.push(format!(
                "<license> '{}' has unexpected attribute '{attr}' (allowed: {})",
                license.text,
                LICENSE_ATTRIBUTES.join(", ")
            ));
        }
    }

    problems
}

/// Whether an attribute name is allowed on `<license>`
#[must_use]
pub fn is_license_attribute(name: &str) -> bool {
    LICENSE_ATTRIBUTES.contains(&name)
}
