use crate::application::dto::ListCopyrightsRequest;
use crate::notice_generation::domain::{LicenseFinding, ScanResult};
use crate::notice_generation::policies::ScannerCriteria;
use crate::ports::outbound::ScanResultsStorage;
use crate::shared::error::NoticeError;
use crate::shared::Result;
use std::fmt::Write;

/// ListCopyrightsUseCase - lists where each copyright of a scanned package was found
///
/// # Type Parameters
/// * `S` - ScanResultsStorage implementation
pub struct ListCopyrightsUseCase<S> {
    storage: S,
}

impl<S: ScanResultsStorage> ListCopyrightsUseCase<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Renders the copyrights of the newest scan result, grouped by license
    ///
    /// # Errors
    /// Returns an error if the storage cannot be read or holds no result for the package
    pub async fn execute(&self, request: ListCopyrightsRequest) -> Result<String> {
        let results = self
            .storage
            .read(&request.package_id, &request.provenance, &ScannerCriteria::any())
            .await?;

        let Some(result) = ScanResult::newest(results) else {
            return Err(NoticeError::Validation {
                message: format!(
                    "no scan result for {} ({}) in {}",
                    request.package_id,
                    request.provenance,
                    self.storage.name()
                ),
            }
            .into());
        };

        let mut out = String::new();
        for finding in result.license_findings() {
            if request
                .license
                .as_deref()
                .is_some_and(|license| license != finding.license)
            {
                continue;
            }
            render_license(&mut out, finding);
        }
        Ok(out)
    }
}

fn render_license(out: &mut String, finding: &LicenseFinding) {
    // Writing to a String cannot fail
    let _ = writeln!(out, "--- {} ---\n", finding.license);
    for copyright in &finding.copyrights {
        let _ = writeln!(out, "{}:", copyright.statement);
        for location in &copyright.locations {
            let _ = writeln!(
                out,
                "  {}:{}-{}",
                location.path(),
                location.start_line(),
                location.end_line()
            );
        }
    }
    out.push('\n');
}
