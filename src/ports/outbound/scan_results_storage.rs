use crate::notice_generation::domain::{PackageIdentifier, Provenance, ScanResult};
use crate::notice_generation::policies::ScannerCriteria;
use crate::shared::Result;
use async_trait::async_trait;

/// ScanResultsStorage port - the scan result cache
///
/// Results are keyed by (package, provenance, scanner name, scanner version).
/// Adding a result for an existing key replaces the stored one, so repeated
/// or concurrent adds of the same scan are harmless.
///
/// # Async Support
/// Implementations must be `Send + Sync`: packages are processed concurrently
/// against a single storage instance.
#[async_trait]
pub trait ScanResultsStorage: Send + Sync {
    /// Name of the backend for log messages
    fn name(&self) -> &str;

    /// Reads all results for `id` and `provenance` produced by a scanner matching `criteria`
    ///
    /// # Returns
    /// An empty vector on a cache miss
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read or holds undecodable data
    async fn read(
        &self,
        id: &PackageIdentifier,
        provenance: &Provenance,
        criteria: &ScannerCriteria,
    ) -> Result<Vec<ScanResult>>;

    /// Stores `result`, replacing a result of the same scanner name and version
    async fn add(&self, result: &ScanResult) -> Result<()>;
}

#[async_trait]
impl<T: ScanResultsStorage + ?Sized> ScanResultsStorage for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn read(
        &self,
        id: &PackageIdentifier,
        provenance: &Provenance,
        criteria: &ScannerCriteria,
    ) -> Result<Vec<ScanResult>> {
        (**self).read(id, provenance, criteria).await
    }

    async fn add(&self, result: &ScanResult) -> Result<()> {
        (**self).add(result).await
    }
}
