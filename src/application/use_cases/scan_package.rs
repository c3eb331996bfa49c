use crate::application::dto::{ScanRequest, ScanResponse};
use crate::notice_generation::domain::{storage_key, ScanResult};
use crate::notice_generation::policies::ScannerCriteria;
use crate::ports::outbound::{FileArchive, ScanResultsStorage, Scanner};
use crate::shared::error::NoticeError;
use crate::shared::Result;

/// ScanPackageUseCase - scans a package unless a compatible result is already cached
///
/// # Type Parameters
/// * `S` - ScanResultsStorage implementation (the cache)
/// * `C` - Scanner implementation
/// * `A` - FileArchive implementation for license files
pub struct ScanPackageUseCase<S, C, A> {
    storage: S,
    scanner: C,
    archive: A,
}

impl<S, C, A> ScanPackageUseCase<S, C, A>
where
    S: ScanResultsStorage,
    C: Scanner,
    A: FileArchive,
{
    pub fn new(storage: S, scanner: C, archive: A) -> Self {
        Self {
            storage,
            scanner,
            archive,
        }
    }

    /// Executes the scan
    ///
    /// A cache hit returns the newest compatible result without running the
    /// scanner. After a fresh scan, failing to store the result or to archive
    /// the license files is logged and does not fail the scan.
    ///
    /// # Errors
    /// Returns `NoticeError::InvalidInputPath` if the source directory is missing
    /// and `NoticeError::ScanEngineFailure` if the scanner fails
    pub async fn execute(&self, request: ScanRequest) -> Result<ScanResponse> {
        if !request.source_dir.is_dir() {
            return Err(NoticeError::InvalidInputPath {
                path: request.source_dir.clone(),
                reason: "Source directory does not exist".to_string(),
            }
            .into());
        }

        if let Some(cached) = self.read_cached(&request).await {
            log::info!(
                "Using cached result of {} for {}",
                cached.scanner(),
                request.package_id
            );
            return Ok(ScanResponse {
                result: cached,
                from_cache: true,
                stored: false,
                archived_files: None,
            });
        }

        let result = self
            .scanner
            .scan(&request.source_dir, &request.package_id, &request.provenance)
            .await?;

        let stored = match self.storage.add(&result).await {
            Ok(()) => true,
            Err(e) => {
                log::error!(
                    "Could not store scan result for {} in {}, it is not cached: {:#}",
                    request.package_id,
                    self.storage.name(),
                    e
                );
                false
            }
        };

        let key = storage_key(&request.package_id, &request.provenance);
        let archived_files = match self.archive.archive(&request.source_dir, &key).await {
            Ok(count) => Some(count),
            Err(e) => {
                log::error!(
                    "Could not archive license files of {}: {:#}",
                    request.package_id,
                    e
                );
                None
            }
        };

        Ok(ScanResponse {
            result,
            from_cache: false,
            stored,
            archived_files,
        })
    }

    /// A cache read failure is treated as a miss
    async fn read_cached(&self, request: &ScanRequest) -> Option<ScanResult> {
        let criteria = ScannerCriteria::for_details(self.scanner.details());
        match self
            .storage
            .read(&request.package_id, &request.provenance, &criteria)
            .await
        {
            Ok(results) => ScanResult::newest(results),
            Err(e) => {
                log::warn!(
                    "Could not read cached results for {} from {}: {:#}",
                    request.package_id,
                    self.storage.name(),
                    e
                );
                None
            }
        }
    }
}
