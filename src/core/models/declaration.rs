//! License declaration model
//!
//! The license tags of a manifest, resolved against the license catalog and
//! the license texts found in the package.

use std::collections::BTreeMap;

use super::glob::Scope;
use super::manifest::LicenseTag;
use crate::core::ports::LicenseCatalog;

/// License text files found by the scan: path (relative to the package
/// root, may start with `../` for repository-level files) to license id
pub type LicenseTexts = BTreeMap<String, String>;

/// One declared license
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseDeclaration {
    /// Identifier as written in the manifest
    pub identifier: String,

    /// Files the declaration covers; `None` is the catch-all
    pub scope: Option<Scope>,

    /// Why the `source-files` attribute could not be compiled
    pub scope_error: Option<String>,

    /// Whether the identifier is in the SPDX list (verbatim or by alias)
    pub is_spdx_valid: bool,

    /// Canonical SPDX identifier, when resolvable
    pub spdx_id: Option<String>,

    /// License text file, declared or inferred
    pub license_file: Option<String>,

    /// License detected in the license text file
    pub text_license: Option<String>,
}

impl LicenseDeclaration {
    /// Build a declaration from a manifest tag
    #[must_use]
    pub fn from_tag(tag: &LicenseTag, catalog: &dyn LicenseCatalog) -> Self {
        let identifier = tag.text.trim().to_string();
        let spdx_id = catalog.resolve(&identifier);

        let (scope, scope_error) = match tag.source_files.as_deref().map(str::trim) {
            None | Some("") => (None, None),
            Some(globs) => match Scope::parse(globs) {
                Ok(scope) => (Some(scope), None),
                Err(e) => (Some(Scope::empty()), Some(e.to_string())),
            },
        };

        Self {
            identifier,
            scope,
            scope_error,
            is_spdx_valid: spdx_id.is_some(),
            spdx_id,
            license_file: tag.file.clone(),
            text_license: None,
        }
    }

    /// Whether the declaration applies to every file (no `source-files`)
    #[must_use]
    pub const fn is_catch_all(&self) -> bool {
        self.scope.is_none()
    }

    /// Whether the declaration's scope contains the file
    #[must_use]
    pub fn applies_to(&self, path: &str) -> bool {
        self.scope.as_ref().is_none_or(|s| s.matches(path))
    }

    /// Whether the declaration names this license identifier
    #[must_use]
    pub fn covers(&self, license_id: &str) -> bool {
        self.identifier == license_id || self.spdx_id.as_deref() == Some(license_id)
    }

    /// Scope as written, `*` for the catch-all
    #[must_use]
    pub fn scope_str(&self) -> String {
        self.scope.as_ref().map_or_else(|| "*".to_string(), ToString::to_string)
    }
}

impl std::fmt::Display for LicenseDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.identifier)
    }
}

/// The ordered declarations of one package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationSet {
    declarations: Vec<LicenseDeclaration>,
    multiple_without_file: bool,
}

impl DeclarationSet {
    /// Build the declarations of a manifest
    ///
    /// # Arguments
    ///
    /// * `tags` - License tags in manifest order
    /// * `catalog` - SPDX reference list
    /// * `license_texts` - License text files found by the scan
    /// * `top_level_files` - Names of all files directly in the package root
    #[must_use]
    pub fn build(
        tags: &[LicenseTag],
        catalog: &dyn LicenseCatalog,
        license_texts: &LicenseTexts,
        top_level_files: &[String],
    ) -> Self {
        let mut declarations: Vec<LicenseDeclaration> = Vec::new();
        for tag in tags.iter().filter(|t| !t.text.trim().is_empty()) {
            let decl = LicenseDeclaration::from_tag(tag, catalog);
            if declarations.iter().any(|d| d.identifier == decl.identifier) {
                log::debug!("Duplicate license tag '{}' ignored", decl.identifier);
                continue;
            }
            declarations.push(decl);
        }

        let without_file = declarations.iter().filter(|d| d.license_file.is_none()).count();
        let multiple_without_file = without_file > 1;
        if without_file == 1 {
            let inferred = infer_license_file(license_texts, top_level_files);
            if let Some(decl) = declarations.iter_mut().find(|d| d.license_file.is_none()) {
                if let Some(file) = &inferred {
                    log::debug!("Using '{file}' as license text of '{}'", decl.identifier);
                }
                decl.license_file = inferred;
            }
        }

        for decl in &mut declarations {
            decl.text_license =
                decl.license_file.as_ref().and_then(|f| license_texts.get(f)).cloned();
        }

        if let ([only], [text]) =
            (declarations.as_mut_slice(), license_texts.values().collect::<Vec<_>>().as_slice())
        {
            if only.text_license.is_none() {
                only.text_license = Some((*text).clone());
            }
        }

        Self {
            declarations,
            multiple_without_file,
        }
    }

    /// Wrap already built declarations
    #[must_use]
    pub const fn from_declarations(declarations: Vec<LicenseDeclaration>) -> Self {
        Self {
            declarations,
            multiple_without_file: false,
        }
    }

    /// All declarations in manifest order
    #[must_use]
    pub fn as_slice(&self) -> &[LicenseDeclaration] {
        &self.declarations
    }

    /// Iterate declarations in manifest order
    pub fn iter(&self) -> std::slice::Iter<'_, LicenseDeclaration> {
        self.declarations.iter()
    }

    /// Number of declarations
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether there are no declarations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Declarations without a scope
    pub fn catch_alls(&self) -> impl Iterator<Item = &LicenseDeclaration> {
        self.declarations.iter().filter(|d| d.is_catch_all())
    }

    /// Whether more than one declaration lacked a `file` attribute
    #[must_use]
    pub const fn multiple_without_file(&self) -> bool {
        self.multiple_without_file
    }

    /// Declarations whose scope contains the file
    pub fn matching<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a LicenseDeclaration> {
        self.declarations.iter().filter(move |d| d.applies_to(path))
    }

    /// Whether any declaration names this license identifier
    #[must_use]
    pub fn any_covers(&self, license_id: &str) -> bool {
        self.declarations.iter().any(|d| d.covers(license_id))
    }

    /// The declaration whose license text is of this license, if any
    #[must_use]
    pub fn by_text_license(&self, license_id: &str) -> Option<&LicenseDeclaration> {
        self.declarations.iter().find(|d| d.text_license.as_deref() == Some(license_id))
    }

    /// Whether the path is referenced as some declaration's license text
    #[must_use]
    pub fn is_license_file(&self, path: &str) -> bool {
        self.declarations.iter().any(|d| d.license_file.as_deref() == Some(path))
    }
}

impl<'a> IntoIterator for &'a DeclarationSet {
    type Item = &'a LicenseDeclaration;
    type IntoIter = std::slice::Iter<'a, LicenseDeclaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}

/// Pick the license text for the one declaration without a `file` attribute
fn infer_license_file(license_texts: &LicenseTexts, top_level_files: &[String]) -> Option<String> {
    let mut inferred = if license_texts.len() == 1 {
        license_texts.keys().next().cloned()
    } else {
        license_texts.keys().find(|p| p.contains("LICENSE")).cloned()
    };

    let by_name: Vec<&String> = top_level_files
        .iter()
        .filter(|f| f.contains("LICENSE") || f.contains("COPYING"))
        .collect();
    if let [only] = by_name.as_slice() {
        inferred = Some((*only).clone());
    }

    inferred
}
