//! Built-in SPDX license catalog
//!
//! The SPDX license list as shipped by the `spdx` crate, common full-name
//! aliases, and the marker phrases the heuristic scanner uses to recognize
//! license texts. Deprecated identifiers (`GPL-3.0`, `LGPL-2.0`, ...) are
//! not accepted; their `-only`/`-or-later` successors are.

use crate::core::ports::LicenseCatalog;

/// Detection data for one license
#[derive(Debug, Clone, Copy)]
pub struct LicenseMarkers {
    /// SPDX identifier
    pub id: &'static str,

    /// Lower-case phrases that must all occur in a text of this license
    pub markers: &'static [&'static str],

    /// Licenses of one family quote each other; only one of them is kept
    pub family: Option<&'static str>,
}

/// Licenses the scanner can recognize from their text
pub const MARKERS: &[LicenseMarkers] = &[
    LicenseMarkers {
        id: "MIT",
        markers: &[
            "permission is hereby granted, free of charge, to any person obtaining a copy",
            "the above copyright notice and this permission notice shall be included",
        ],
        family: None,
    },
    LicenseMarkers {
        id: "Apache-2.0",
        markers: &["apache license", "version 2.0"],
        family: None,
    },
    LicenseMarkers {
        id: "BSD-2-Clause",
        markers: &[
            "redistribution and use in source and binary forms",
            "this list of conditions and the following disclaimer",
        ],
        family: Some("bsd"),
    },
    LicenseMarkers {
        id: "BSD-3-Clause",
        markers: &[
            "redistribution and use in source and binary forms",
            "this list of conditions and the following disclaimer",
            "neither the name of",
        ],
        family: Some("bsd"),
    },
    LicenseMarkers {
        id: "GPL-2.0-only",
        markers: &["gnu general public license", "version 2"],
        family: Some("gpl"),
    },
    LicenseMarkers {
        id: "GPL-3.0-only",
        markers: &["gnu general public license", "version 3"],
        family: Some("gpl"),
    },
    LicenseMarkers {
        id: "LGPL-2.1-only",
        markers: &["gnu lesser general public license", "version 2.1"],
        family: Some("gpl"),
    },
    LicenseMarkers {
        id: "LGPL-3.0-only",
        markers: &["gnu lesser general public license", "version 3"],
        family: Some("gpl"),
    },
    LicenseMarkers {
        id: "AGPL-3.0-only",
        markers: &["gnu affero general public license", "version 3"],
        family: Some("gpl"),
    },
    LicenseMarkers {
        id: "MPL-2.0",
        markers: &["mozilla public license", "2.0"],
        family: None,
    },
    LicenseMarkers {
        id: "ISC",
        markers: &[
            "permission to use, copy, modify, and/or distribute this software for any purpose with or without fee is hereby granted",
        ],
        family: None,
    },
    LicenseMarkers {
        id: "BSL-1.0",
        markers: &["boost software license", "version 1.0"],
        family: None,
    },
    LicenseMarkers {
        id: "Unlicense",
        markers: &["this is free and unencumbered software released into the public domain"],
        family: None,
    },
    LicenseMarkers {
        id: "CC0-1.0",
        markers: &["cc0 1.0 universal"],
        family: None,
    },
    LicenseMarkers {
        id: "Zlib",
        markers: &[
            "this software is provided 'as-is', without any express or implied warranty",
            "altered source versions must be plainly marked as such",
        ],
        family: None,
    },
    LicenseMarkers {
        id: "EPL-2.0",
        markers: &["eclipse public license", "v 2.0"],
        family: None,
    },
];

/// Common spellings that are not SPDX identifiers
const ALIASES: &[(&str, &str)] = &[
    ("apache 2", "Apache-2.0"),
    ("apache 2.0", "Apache-2.0"),
    ("apache license, version 2.0", "Apache-2.0"),
    ("apache license version 2.0", "Apache-2.0"),
    ("apache-2", "Apache-2.0"),
    ("apachev2", "Apache-2.0"),
    ("bsd 2-clause", "BSD-2-Clause"),
    ("bsd 3-clause", "BSD-3-Clause"),
    ("boost software license", "BSL-1.0"),
    ("gplv2", "GPL-2.0-only"),
    ("gplv3", "GPL-3.0-only"),
    ("lgplv2.1", "LGPL-2.1-only"),
    ("lgplv3", "LGPL-3.0-only"),
    ("mozilla public license 2.0", "MPL-2.0"),
    ("the mit license", "MIT"),
];

/// The compiled-in license list
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    /// Create the catalog
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Version of the SPDX license list
    #[must_use]
    pub const fn list_version() -> &'static str {
        ::spdx::identifiers::VERSION
    }
}

/// A listed, non-deprecated license, matched verbatim
fn listed(id: &str) -> Option<::spdx::LicenseId> {
    // `license_id` strips a trailing `+`, which is not part of any identifier
    ::spdx::license_id(id).filter(|lic| lic.name == id && !lic.is_deprecated())
}

impl LicenseCatalog for BuiltinCatalog {
    fn is_valid(&self, id: &str) -> bool {
        listed(id).is_some()
    }

    fn alias(&self, name: &str) -> Option<String> {
        let lowered = name.trim().to_lowercase();
        ::spdx::identifiers::LICENSES
            .iter()
            .filter(|lic| lic.1.to_lowercase() == lowered)
            .find_map(|lic| listed(lic.0))
            .map(|lic| lic.name)
            .or_else(|| ALIASES.iter().find(|(alias, _)| *alias == lowered).map(|(_, id)| *id))
            .map(String::from)
    }
}
