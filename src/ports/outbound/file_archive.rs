use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// FileArchive port for keeping the license files of scanned source trees
///
/// Archives are addressed by a storage path, normally
/// [`crate::notice_generation::domain::storage_key`] of the scanned package.
#[async_trait]
pub trait FileArchive: Send + Sync {
    /// Archives the license files below `source_dir`, returning how many were stored
    async fn archive(&self, source_dir: &Path, storage_path: &str) -> Result<usize>;

    /// Restores the archive at `storage_path` into `target_dir`
    ///
    /// # Returns
    /// `false` if there is no archive at `storage_path` or it could not be read
    ///
    /// # Errors
    /// `NoticeError::ArchiveCorrupt` if an archive exists but cannot be extracted
    async fn unarchive(&self, target_dir: &Path, storage_path: &str) -> Result<bool>;
}
