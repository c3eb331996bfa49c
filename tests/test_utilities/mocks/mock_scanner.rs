use async_trait::async_trait;
use chrono::Utc;
use notice_kit::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock Scanner returning fixed findings
pub struct MockScanner {
    details: ScannerDetails,
    licenses: Vec<LicenseFinding>,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockScanner {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            details: ScannerDetails::new(name, version, ""),
            licenses: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_license(mut self, finding: LicenseFinding) -> Self {
        self.licenses.push(finding);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Scanner for MockScanner {
    fn details(&self) -> &ScannerDetails {
        &self.details
    }

    async fn scan(
        &self,
        _source_dir: &Path,
        id: &PackageIdentifier,
        provenance: &Provenance,
    ) -> Result<ScanResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let copyrights: Vec<CopyrightFinding> = self
            .licenses
            .iter()
            .flat_map(|l| l.copyrights.iter().cloned())
            .collect();
        Ok(ScanResult::new(
            id.clone(),
            provenance.clone(),
            self.details.clone(),
            Utc::now(),
            Utc::now(),
            self.licenses.clone(),
            copyrights,
        ))
    }
}
