use super::PackageIdentifier;
use std::collections::BTreeSet;

/// An archived license file reproduced verbatim in a notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseFileNotice {
    /// Path relative to the root of the scanned source tree
    pub path: String,
    pub content: String,
    /// Normalized copyrights of the file's licenses found outside the file itself
    pub copyrights: BTreeSet<String>,
}

/// A license found in the source code together with its text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseNotice {
    pub license: String,
    pub copyrights: BTreeSet<String>,
    pub text: String,
}

/// PackageNotice - everything the notice of a single package is made of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageNotice {
    pub id: PackageIdentifier,
    pub license_files: Vec<LicenseFileNotice>,
    pub licenses: Vec<LicenseNotice>,
}

impl PackageNotice {
    /// A notice with only the package header
    pub fn empty(id: PackageIdentifier) -> Self {
        Self {
            id,
            license_files: Vec::new(),
            licenses: Vec::new(),
        }
    }

    pub fn has_license_information(&self) -> bool {
        !self.license_files.is_empty() || !self.licenses.is_empty()
    }
}
