//! License catalog port
//!
//! Defines the lookup into the reference list of standardized (SPDX)
//! license identifiers.

/// Reference list of license identifiers
pub trait LicenseCatalog: Send + Sync {
    /// Whether `id` is a listed identifier, verbatim
    fn is_valid(&self, id: &str) -> bool;

    /// Resolve a full license name to its identifier
    ///
    /// Returns `None` for names the catalog does not know.
    fn alias(&self, name: &str) -> Option<String>;

    /// Canonical identifier for an identifier or a known full name
    fn resolve(&self, name: &str) -> Option<String> {
        let name = name.trim();
        if self.is_valid(name) {
            Some(name.to_string())
        } else {
            self.alias(name)
        }
    }
}
