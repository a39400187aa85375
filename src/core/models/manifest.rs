//! Package manifest model
//!
//! The parts of a `package.xml` the checks look at. Parsing lives in
//! `adapters::manifest`; this is plain data.

/// A `<license>` element as written in the manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseTag {
    /// Element text, trimmed
    pub text: String,

    /// `file` attribute: path of the license text, relative to the package
    pub file: Option<String>,

    /// `source-files` attribute: space-separated globs
    pub source_files: Option<String>,

    /// Names of any other attributes
    pub unknown_attributes: Vec<String>,
}

/// A `<maintainer>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Maintainer {
    /// Element text
    pub name: String,

    /// `email` attribute
    pub email: Option<String>,
}

/// Structural content of a package manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageManifest {
    /// Name of the root element (expected: `package`)
    pub root: String,

    /// Raw `format` attribute of the root element
    pub format: Option<String>,

    /// Every `<name>` element text
    pub names: Vec<String>,

    /// Every `<version>` element text
    pub versions: Vec<String>,

    /// Every `<description>` element text
    pub descriptions: Vec<String>,

    /// Every `<maintainer>` element
    pub maintainers: Vec<Maintainer>,

    /// Every `<license>` element, in document order
    pub licenses: Vec<LicenseTag>,
}

impl PackageManifest {
    /// The declared package name, if there is exactly one
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self.names.as_slice() {
            [name] => Some(name.as_str()),
            _ => None,
        }
    }

    /// The manifest format version (an absent attribute means format 1)
    ///
    /// Returns `None` when the attribute is not a number.
    #[must_use]
    pub fn format_version(&self) -> Option<u32> {
        self.format.as_deref().map_or(Some(1), |f| f.trim().parse().ok())
    }
}
