use async_trait::async_trait;
use notice_kit::prelude::*;
use std::sync::Mutex;

/// Mock ScanResultsStorage keeping results in a vector
#[derive(Default)]
pub struct MockScanResultsStorage {
    pub results: Mutex<Vec<ScanResult>>,
    pub should_fail: bool,
}

#[allow(dead_code)]
impl MockScanResultsStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(self, result: ScanResult) -> Self {
        self.results.lock().unwrap().push(result);
        self
    }

    pub fn with_failure() -> Self {
        Self {
            results: Mutex::new(Vec::new()),
            should_fail: true,
        }
    }

    pub fn len(&self) -> usize {
        self.results.lock().unwrap().len()
    }
}

#[async_trait]
impl ScanResultsStorage for MockScanResultsStorage {
    fn name(&self) -> &str {
        "MockScanResultsStorage"
    }

    async fn read(
        &self,
        id: &PackageIdentifier,
        provenance: &Provenance,
        criteria: &ScannerCriteria,
    ) -> Result<Vec<ScanResult>> {
        if self.should_fail {
            anyhow::bail!("Mock scan results storage failure");
        }
        Ok(self
            .results
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.package_id() == id && r.provenance() == provenance)
            .filter(|r| criteria.matches(r.scanner()))
            .cloned()
            .collect())
    }

    async fn add(&self, result: &ScanResult) -> Result<()> {
        if self.should_fail {
            anyhow::bail!("Mock scan results storage failure");
        }
        let mut results = self.results.lock().unwrap();
        results.retain(|r| {
            !(r.package_id() == result.package_id()
                && r.provenance() == result.provenance()
                && r.scanner().name == result.scanner().name
                && r.scanner().version == result.scanner().version)
        });
        results.push(result.clone());
        Ok(())
    }
}
