use crate::notice_generation::domain::{PackageIdentifier, Provenance, ScanResult};
use std::path::PathBuf;

/// ScanRequest - scan one package whose sources are checked out at `source_dir`
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub package_id: PackageIdentifier,
    pub provenance: Provenance,
    pub source_dir: PathBuf,
}

impl ScanRequest {
    pub fn new(package_id: PackageIdentifier, provenance: Provenance, source_dir: PathBuf) -> Self {
        Self {
            package_id,
            provenance,
            source_dir,
        }
    }
}

/// ScanResponse - the result of a scan and what happened to it
#[derive(Debug, Clone)]
pub struct ScanResponse {
    pub result: ScanResult,
    /// The result came from the cache; the scanner did not run
    pub from_cache: bool,
    /// A fresh result was written to the cache
    pub stored: bool,
    /// Number of archived license files, `None` if archiving was skipped or failed
    pub archived_files: Option<usize>,
}
