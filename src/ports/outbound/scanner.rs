use crate::notice_generation::domain::{PackageIdentifier, Provenance, ScanResult, ScannerDetails};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// Scanner port - a license and copyright scanner treated as a black box
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Name, version and configuration of the scanner, used to key cached results
    fn details(&self) -> &ScannerDetails;

    /// Scans the source tree at `source_dir`
    ///
    /// Finding paths in the result are relative to `source_dir`.
    ///
    /// # Errors
    /// Returns `NoticeError::ScanEngineFailure` if the scanner fails to run
    /// or produces output that cannot be understood
    async fn scan(
        &self,
        source_dir: &Path,
        id: &PackageIdentifier,
        provenance: &Provenance,
    ) -> Result<ScanResult>;
}
