use crate::notice_generation::domain::{PackageIdentifier, Provenance};

/// ListCopyrightsRequest - list the copyright findings of one scanned package
#[derive(Debug, Clone)]
pub struct ListCopyrightsRequest {
    pub package_id: PackageIdentifier,
    pub provenance: Provenance,
    /// Only list copyrights attributed to this license
    pub license: Option<String>,
}
