use crate::notice_generation::domain::{storage_key, PackageIdentifier, Provenance, ScanResult};
use crate::notice_generation::policies::ScannerCriteria;
use crate::ports::outbound::{FileStorage, ScanResultsStorage};
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

const SCAN_RESULTS_FILE_NAME: &str = "scan-results.json";

/// All results stored for one (package, provenance) key
#[derive(Debug, Serialize, Deserialize)]
struct ScanResultContainer {
    id: PackageIdentifier,
    #[serde(default)]
    results: Vec<ScanResult>,
}

/// FileBasedScanStorage adapter keeping scan results as JSON files in a [`FileStorage`]
///
/// Each (package, provenance) pair owns one file at
/// `<package path>/<provenance hash>/scan-results.json`. Adds to the same file
/// are serialized by a per-file lock; adds to different files run in parallel.
pub struct FileBasedScanStorage<S: FileStorage> {
    backend: S,
    name: String,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<S: FileStorage> FileBasedScanStorage<S> {
    pub fn new(backend: S) -> Self {
        let name = format!("FileBasedStorage({})", backend.location());
        Self {
            backend,
            name,
            locks: DashMap::new(),
        }
    }

    pub fn storage_path(id: &PackageIdentifier, provenance: &Provenance) -> String {
        format!("{}/{}", storage_key(id, provenance), SCAN_RESULTS_FILE_NAME)
    }

    async fn read_container(&self, path: &str) -> Result<Option<ScanResultContainer>> {
        let Some(bytes) = self.backend.read(path).await? else {
            return Ok(None);
        };
        let container = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse stored scan results at '{}'", path))?;
        Ok(Some(container))
    }
}

#[async_trait]
impl<S: FileStorage> ScanResultsStorage for FileBasedScanStorage<S> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(
        &self,
        id: &PackageIdentifier,
        provenance: &Provenance,
        criteria: &ScannerCriteria,
    ) -> Result<Vec<ScanResult>> {
        let path = Self::storage_path(id, provenance);
        let Some(container) = self.read_container(&path).await? else {
            log::debug!("No stored scan results for {} at '{}'", id, path);
            return Ok(Vec::new());
        };

        // Equal hashes do not imply equal keys
        let results = container
            .results
            .into_iter()
            .filter(|r| r.package_id() == id && r.provenance() == provenance)
            .filter(|r| criteria.matches(r.scanner()))
            .collect();
        Ok(results)
    }

    async fn add(&self, result: &ScanResult) -> Result<()> {
        let path = Self::storage_path(result.package_id(), result.provenance());
        let lock = self.locks.entry(path.clone()).or_default().clone();
        let _guard = lock.lock().await;

        let mut container = self
            .read_container(&path)
            .await?
            .unwrap_or_else(|| ScanResultContainer {
                id: result.package_id().clone(),
                results: Vec::new(),
            });

        container.results.retain(|existing| {
            !(existing.provenance() == result.provenance()
                && existing.scanner().name == result.scanner().name
                && existing.scanner().version == result.scanner().version)
        });
        container.results.push(result.clone());

        let bytes = serde_json::to_vec_pretty(&container)?;
        self.backend.write(&path, bytes).await?;

        log::debug!(
            "Stored scan result of {} for {} at '{}'",
            result.scanner(),
            result.package_id(),
            path
        );
        Ok(())
    }
}
