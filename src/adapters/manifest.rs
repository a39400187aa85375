//! `package.xml` reader
//!
//! Streams the manifest with `quick-xml` and keeps the elements the checks
//! need. Structural problems (missing elements, unknown attributes) are left
//! to the schema check; only documents that are not well-formed XML fail
//! here.

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

use crate::core::models::{LicenseTag, Maintainer, PackageManifest};
use crate::core::services::schema::is_license_attribute;

/// Errors that can occur while reading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// Manifest path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The manifest is not well-formed XML
    #[error("not well-formed XML: {0}")]
    Xml(String),

    /// The document has no root element
    #[error("no root element")]
    NoRoot,
}

impl From<quick_xml::Error> for ManifestError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ManifestError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(e.to_string())
    }
}

/// Read and parse a manifest file
pub fn read_manifest(path: &Path) -> Result<PackageManifest, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&content)
}

/// A direct child of the root being read
#[derive(Debug, Default)]
struct OpenChild {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
}

/// Parse manifest content
pub fn parse_manifest(content: &str) -> Result<PackageManifest, ManifestError> {
    let mut reader = Reader::from_str(content);
    let mut manifest = PackageManifest::default();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut child: Option<OpenChild> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if depth == 0 {
                    open_root(&mut manifest, &e, &mut seen_root)?;
                } else if depth == 1 {
                    child = Some(open_child(&e)?);
                }
                depth += 1;
            },
            Event::Empty(e) => {
                if depth == 0 {
                    open_root(&mut manifest, &e, &mut seen_root)?;
                } else if depth == 1 {
                    close_child(&mut manifest, &open_child(&e)?);
                }
            },
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 1 {
                    if let Some(c) = child.take() {
                        close_child(&mut manifest, &c);
                    }
                }
            },
            Event::Text(t) => {
                if let Some(c) = child.as_mut() {
                    c.text.push_str(&t.unescape()?);
                }
            },
            Event::CData(t) => {
                if let Some(c) = child.as_mut() {
                    c.text.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }

    if depth != 0 {
        return Err(ManifestError::Xml("unexpected end of document".to_string()));
    }
    if !seen_root {
        return Err(ManifestError::NoRoot);
    }

    Ok(manifest)
}

fn open_root(manifest: &mut PackageManifest, e: &BytesStart<'_>, seen_root: &mut bool) -> Result<(), ManifestError> {
    if *seen_root {
        return Err(ManifestError::Xml("more than one root element".to_string()));
    }
    *seen_root = true;
    manifest.root = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"format" {
            manifest.format = Some(attr.unescape_value()?.into_owned());
        }
    }
    Ok(())
}

fn open_child(e: &BytesStart<'_>) -> Result<OpenChild, ManifestError> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        attributes.push((
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            attr.unescape_value()?.into_owned(),
        ));
    }
    Ok(OpenChild {
        name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
        attributes,
        text: String::new(),
    })
}

fn close_child(manifest: &mut PackageManifest, child: &OpenChild) {
    let text = child.text.trim().to_string();
    let attribute = |name: &str| {
        child.attributes.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    };

    match child.name.as_str() {
        "name" => manifest.names.push(text),
        "version" => manifest.versions.push(text),
        "description" => manifest.descriptions.push(text),
        "maintainer" => manifest.maintainers.push(Maintainer {
            name: text,
            email: attribute("email"),
        }),
        "license" => manifest.licenses.push(LicenseTag {
            text,
            file: attribute("file"),
            source_files: attribute("source-files"),
            unknown_attributes: child
                .attributes
                .iter()
                .map(|(k, _)| k.clone())
                .filter(|k| !is_license_attribute(k))
                .collect(),
        }),
        _ => {},
    }
}
