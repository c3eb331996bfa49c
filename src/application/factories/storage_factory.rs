use crate::adapters::outbound::archive::FileArchiver;
use crate::adapters::outbound::storage::{
    FileBasedScanStorage, HttpFileStorage, LocalFileStorage, SqliteScanStorage,
};
use crate::config::{
    expand_home, FileStorageBackend, FileStorageConfig, ScanStorageBackend, ScanStorageConfig,
};
use crate::notice_generation::services::FileMatcher;
use crate::ports::outbound::{FileStorage, ScanResultsStorage};
use crate::shared::Result;

/// Factory for creating storage adapters from configuration
///
/// The backend is chosen once, here; the use cases only ever see the ports.
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the blob store selected by `config`
    ///
    /// # Errors
    /// Returns an error if not exactly one backend is configured or the HTTP
    /// headers are invalid
    pub fn file_storage(config: &FileStorageConfig, section: &str) -> Result<Box<dyn FileStorage>> {
        let storage = Self::file_storage_for(config.backend(section)?)?;
        log::debug!("Using {} for {}", storage.location(), section);
        Ok(storage)
    }

    fn file_storage_for(backend: FileStorageBackend<'_>) -> Result<Box<dyn FileStorage>> {
        let storage: Box<dyn FileStorage> = match backend {
            FileStorageBackend::Local(local) => {
                Box::new(LocalFileStorage::new(expand_home(&local.directory)))
            }
            FileStorageBackend::Http(http) => {
                Box::new(HttpFileStorage::new(http.url.clone(), &http.headers)?)
            }
        };
        Ok(storage)
    }

    /// Creates the scan result cache selected by `config`
    pub async fn scan_results_storage(
        config: &ScanStorageConfig,
    ) -> Result<Box<dyn ScanResultsStorage>> {
        let storage: Box<dyn ScanResultsStorage> = match config.backend()? {
            ScanStorageBackend::FileBased(backend) => {
                Box::new(FileBasedScanStorage::new(Self::file_storage_for(backend)?))
            }
            ScanStorageBackend::Sqlite(sqlite) => {
                Box::new(SqliteScanStorage::new(expand_home(&sqlite.path)).await?)
            }
        };
        log::debug!("Using {} for scan results", storage.name());
        Ok(storage)
    }

    /// Creates the license file archiver
    ///
    /// # Arguments
    /// * `config` - Where archives are stored
    /// * `patterns` - Files to archive; the license file names if `None`
    pub fn archiver(
        config: &FileStorageConfig,
        patterns: Option<&[String]>,
    ) -> Result<FileArchiver<Box<dyn FileStorage>>> {
        let matcher = match patterns {
            Some(patterns) => FileMatcher::new(patterns.iter().cloned())?,
            None => FileMatcher::license_file_matcher(),
        };
        let storage = Self::file_storage(config, "archive.storage")?;
        Ok(FileArchiver::new(matcher, storage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HttpStorageConfig, SqliteStorageConfig};
    use crate::ports::outbound::FileArchive;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_local_file_storage() {
        let dir = TempDir::new().unwrap();
        let storage =
            StorageFactory::file_storage(&FileStorageConfig::local(dir.path()), "archive.storage")
                .unwrap();
        assert_eq!(storage.location(), dir.path().display().to_string());
    }

    #[test]
    fn test_http_file_storage() {
        let config = FileStorageConfig {
            local: None,
            http: Some(HttpStorageConfig {
                url: "https://archive.example.com/files".to_string(),
                headers: BTreeMap::new(),
            }),
        };
        let storage = StorageFactory::file_storage(&config, "archive.storage").unwrap();
        assert!(storage.location().starts_with("https://archive.example.com/files"));
    }

    #[test]
    fn test_missing_backend_is_rejected() {
        let result = StorageFactory::file_storage(&FileStorageConfig::default(), "archive.storage");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_file_based_scan_results_storage() {
        let dir = TempDir::new().unwrap();
        let config = ScanStorageConfig {
            file_based: Some(FileStorageConfig::local(dir.path())),
            sqlite: None,
        };
        let storage = StorageFactory::scan_results_storage(&config).await.unwrap();
        assert!(storage.name().starts_with("FileBasedStorage("));
    }

    #[tokio::test]
    async fn test_sqlite_scan_results_storage() {
        let dir = TempDir::new().unwrap();
        let config = ScanStorageConfig {
            file_based: None,
            sqlite: Some(SqliteStorageConfig {
                path: dir.path().join("cache").join("results.db"),
            }),
        };
        StorageFactory::scan_results_storage(&config).await.unwrap();
        assert!(dir.path().join("cache").join("results.db").exists());
    }

    #[tokio::test]
    async fn test_archiver_with_custom_patterns() {
        let archive_dir = TempDir::new().unwrap();
        let source = TempDir::new().unwrap();
        std::fs::write(source.path().join("NOTICE"), "notice").unwrap();
        std::fs::write(source.path().join("LICENSE"), "license").unwrap();

        let patterns = vec!["NOTICE".to_string()];
        let archiver = StorageFactory::archiver(
            &FileStorageConfig::local(archive_dir.path()),
            Some(&patterns),
        )
        .unwrap();

        assert_eq!(archiver.archive(source.path(), "pkg").await.unwrap(), 1);
    }
}
