//! Check engine - the compliance rules
//!
//! Each [`Check`] is a pure function of a [`PackageContext`] producing one
//! [`CheckResult`]. The set of checks is closed and always runs in the order
//! of [`Check::ALL`]; order only affects how the report reads.

use crate::core::models::{CheckResult, LicenseDeclaration, PackageContext, Severity};
use crate::core::services::coverage::{self, Uncovered};
use crate::core::services::schema;
use crate::paths::MANIFEST_FILE;

const NO_LICENSE_TAG: &str = "No license tag defined.";

const SPDX_LIST_URL: &str = "https://spdx.org/licenses/";

/// One compliance rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    /// The manifest has the expected structure
    Schema,
    /// At least one license is declared, at most one without a scope
    LicenseTagExists,
    /// Declared identifiers are in the SPDX list
    LicenseTagIsSpdx,
    /// Every declaration has its license text
    LicenseTextExists,
    /// Every license detected in the code is declared for that file
    LicensesInCode,
    /// Every license text in the package is referenced by a declaration
    LicenseFilesReferenced,
}

impl Check {
    /// All checks in report order
    pub const ALL: [Self; 6] = [
        Self::Schema,
        Self::LicenseTagExists,
        Self::LicenseTagIsSpdx,
        Self::LicenseTextExists,
        Self::LicensesInCode,
        Self::LicenseFilesReferenced,
    ];

    /// Name shown in reports
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Schema => "SchemaCheck",
            Self::LicenseTagExists => "LicenseTagExistsCheck",
            Self::LicenseTagIsSpdx => "LicenseTagIsInSpdxListCheck",
            Self::LicenseTextExists => "LicenseTextExistsCheck",
            Self::LicensesInCode => "LicensesInCodeCheck",
            Self::LicenseFilesReferenced => "LicenseFilesReferencedCheck",
        }
    }

    /// Evaluate this check against a package
    #[must_use]
    pub fn evaluate(self, ctx: &PackageContext) -> CheckResult {
        match self {
            Self::Schema => check_schema(ctx),
            Self::LicenseTagExists => check_tag_exists(ctx),
            Self::LicenseTagIsSpdx => check_tag_is_spdx(ctx),
            Self::LicenseTextExists => check_text_exists(ctx),
            Self::LicensesInCode => check_licenses_in_code(ctx),
            Self::LicenseFilesReferenced => check_files_referenced(ctx),
        }
    }
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Run every check against a package, in report order
#[must_use]
pub fn run_checks(ctx: &PackageContext) -> Vec<CheckResult> {
    Check::ALL.iter().map(|check| check.evaluate(ctx)).collect()
}

fn check_schema(ctx: &PackageContext) -> CheckResult {
    let name = Check::Schema.name();
    let mut problems = schema::validate_manifest(&ctx.manifest);
    for decl in &ctx.declarations {
        if let Some(err) = &decl.scope_error {
            problems.push(format!("<license> '{}' has invalid source-files: {err}", decl.identifier));
        }
    }

    if problems.is_empty() {
        let version = ctx.manifest.format_version().unwrap_or(1);
        return CheckResult::pass(
            name,
            format!("Detected {MANIFEST_FILE} format {version}, validation of structure successful."),
        );
    }

    CheckResult::error(name, format!("{MANIFEST_FILE} contains errors:\n{}", bullet_list(&problems)))
        .with_paths(vec![MANIFEST_FILE.to_string()])
}

fn check_tag_exists(ctx: &PackageContext) -> CheckResult {
    let name = Check::LicenseTagExists.name();
    if ctx.declarations.is_empty() {
        return CheckResult::error(name, NO_LICENSE_TAG).with_paths(vec![MANIFEST_FILE.to_string()]);
    }

    let catch_alls: Vec<&str> =
        ctx.declarations.catch_alls().map(|d| d.identifier.as_str()).collect();
    if catch_alls.len() > 1 {
        return CheckResult::warning(
            name,
            format!(
                "There must be at most one license tag without source-files, found {}: {}",
                catch_alls.len(),
                catch_alls.join(", ")
            ),
        );
    }

    CheckResult::pass(name, format!("Found licenses {}", identifier_list(ctx.declarations.iter())))
}

fn check_tag_is_spdx(ctx: &PackageContext) -> CheckResult {
    let name = Check::LicenseTagIsSpdx.name();
    let invalid: Vec<&LicenseDeclaration> =
        ctx.declarations.iter().filter(|d| !d.is_spdx_valid).collect();

    let aliases: Vec<String> = ctx
        .declarations
        .iter()
        .filter_map(|d| {
            d.spdx_id
                .as_deref()
                .filter(|id| *id != d.identifier)
                .map(|id| format!("'{}' is the SPDX license {id}", d.identifier))
        })
        .collect();

    if invalid.is_empty() {
        return CheckResult::pass(name, "All license tags are in SPDX list of licenses.")
            .with_details(aliases);
    }

    CheckResult::warning(
        name,
        format!(
            "Licenses {} are not in SPDX list of licenses. Make sure to exactly match one of {SPDX_LIST_URL}.",
            identifier_list(invalid.into_iter())
        ),
    )
    .with_details(aliases)
}

fn check_text_exists(ctx: &PackageContext) -> CheckResult {
    let name = Check::LicenseTextExists.name();
    if ctx.declarations.is_empty() {
        return CheckResult::error(name, NO_LICENSE_TAG);
    }

    let mut problems = Vec::new();
    let mut paths = Vec::new();
    let mut severity = Severity::Pass;

    if ctx.declarations.multiple_without_file() {
        problems.push("There must be at most one license tag without a license text file.".to_string());
        severity = Severity::Error;
    }

    for decl in &ctx.declarations {
        let Some((problem_severity, problem)) = text_problem(ctx, decl) else {
            continue;
        };
        severity = severity.max(problem_severity);
        problems.push(format!("'{}': {problem}", decl.identifier));
        if let Some(f) = &decl.license_file {
            paths.push(f.clone());
        }
    }

    let details: Vec<String> =
        ctx.license_texts.iter().map(|(path, id)| format!("'{path}' is a license text of {id}")).collect();

    match severity {
        Severity::Pass => {
            CheckResult::pass(name, "All license tags have a valid license text file.").with_details(details)
        },
        Severity::Warning => CheckResult::warning(
            name,
            format!(
                "Since they are not in the SPDX list, we can not check if these tags have the correct license text:\n{}",
                bullet_list(&problems)
            ),
        )
        .with_paths(paths)
        .with_details(details),
        Severity::Error => CheckResult::error(
            name,
            format!(
                "The following license tags do not have a valid license text file:\n{}",
                bullet_list(&problems)
            ),
        )
        .with_paths(paths)
        .with_details(details),
    }
}

/// What is wrong with a declaration's license text, if anything
fn text_problem(ctx: &PackageContext, decl: &LicenseDeclaration) -> Option<(Severity, String)> {
    let Some(file) = decl.license_file.as_deref() else {
        return Some((Severity::Error, "No license text file defined.".to_string()));
    };

    if !ctx.file_exists(file) {
        return Some((Severity::Error, format!("License text file '{file}' does not exist.")));
    }
    if !ctx.was_scanned(file) {
        return Some((Severity::Error, format!("License text file '{file}' not included in scan results.")));
    }

    let Some(actual) = ctx.license_texts.get(file) else {
        return Some((Severity::Error, format!("License text file '{file}' is not recognized as license text.")));
    };

    if decl.covers(actual) {
        return None;
    }

    // A tag outside the SPDX list cannot be compared to the text
    let severity = if decl.is_spdx_valid { Severity::Error } else { Severity::Warning };
    Some((
        severity,
        format!("License text file '{file}' is of license {actual} but tag is {}.", decl.identifier),
    ))
}

fn check_licenses_in_code(ctx: &PackageContext) -> CheckResult {
    let name = Check::LicensesInCode.name();
    if ctx.declarations.is_empty() {
        return CheckResult::error(name, NO_LICENSE_TAG);
    }

    let skipped: Vec<String> = ctx
        .evidence
        .values()
        .filter_map(|e| e.note.as_ref().map(|note| format!("not scanned ({note}): '{}'", e.path)))
        .collect();

    let uncovered = coverage::find_uncovered(&ctx.declarations, &ctx.evidence);
    if uncovered.is_empty() {
        return CheckResult::pass(
            name,
            "All licenses found in the code are covered by a license declaration.",
        )
        .with_details(skipped);
    }

    let mut paths: Vec<String> = uncovered.iter().map(|u| u.path.clone()).collect();
    paths.dedup();

    let lines: Vec<String> = group_by_file(&uncovered);
    let mut details: Vec<String> = uncovered
        .iter()
        .filter_map(|u| {
            ctx.evidence.get(&u.path).map(|e| {
                let detected: Vec<&str> = e.detected_licenses.iter().map(String::as_str).collect();
                let covered: Vec<&str> =
                    coverage::covered_licenses(&ctx.declarations, &e.path).into_iter().collect();
                format!("'{}': detected [{}], declared [{}]", e.path, detected.join(", "), covered.join(", "))
            })
        })
        .collect();
    details.dedup();
    details.extend(skipped);

    CheckResult::error(
        name,
        format!(
            "The following files contain licenses that are not covered by any license tag:\n{}",
            bullet_list(&lines)
        ),
    )
    .with_paths(paths)
    .with_details(details)
}

/// One report line per file: `'path': ID, ID (hint)`
fn group_by_file(uncovered: &[Uncovered]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current: Option<&str> = None;
    let mut entries: Vec<String> = Vec::new();

    for u in uncovered {
        if current != Some(u.path.as_str()) {
            if let Some(path) = current {
                lines.push(format!("'{path}': {}", entries.join(", ")));
            }
            current = Some(u.path.as_str());
            entries.clear();
        }
        entries.push(u.declared_as.as_ref().map_or_else(
            || u.license.clone(),
            |tag| format!("{} (its license text is tagged '{tag}', use the SPDX identifier)", u.license),
        ));
    }
    if let Some(path) = current {
        lines.push(format!("'{path}': {}", entries.join(", ")));
    }

    lines
}

fn check_files_referenced(ctx: &PackageContext) -> CheckResult {
    let name = Check::LicenseFilesReferenced.name();
    if ctx.declarations.is_empty() {
        return CheckResult::pass(name, "No license tag defined, nothing to reference.");
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut paths = Vec::new();

    // Repository-level texts above the package are not the package's business
    for (path, license) in ctx.license_texts.iter().filter(|(p, _)| !p.starts_with("../")) {
        if ctx.declarations.any_covers(license) {
            continue;
        }
        paths.push(path.clone());
        match ctx.declarations.by_text_license(license) {
            Some(decl) => {
                warnings.push(format!("'{path}' is of {license} but its tag is {}.", decl.identifier));
            },
            None => errors.push(format!("'{path}' is of {license}.")),
        }
    }

    if !errors.is_empty() {
        errors.extend(warnings);
        return CheckResult::error(
            name,
            format!("The following license files are not mentioned by any tag:\n{}", bullet_list(&errors)),
        )
        .with_paths(paths);
    }
    if !warnings.is_empty() {
        return CheckResult::warning(
            name,
            format!(
                "The following license files are referenced by a tag that is not their SPDX identifier:\n{}",
                bullet_list(&warnings)
            ),
        )
        .with_paths(paths);
    }

    CheckResult::pass(name, "All license declarations are referenced by a tag.")
}

fn bullet_list(lines: &[String]) -> String {
    lines.iter().map(|l| format!("  {l}")).collect::<Vec<_>>().join("\n")
}

fn identifier_list<'a>(decls: impl Iterator<Item = &'a LicenseDeclaration>) -> String {
    let ids: Vec<String> = decls.map(|d| format!("'{}'", d.identifier)).collect();
    format!("[{}]", ids.join(", "))
}
