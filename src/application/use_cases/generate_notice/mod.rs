use crate::application::dto::{NoticeRequest, NoticeResponse};
use crate::notice_generation::domain::{
    storage_key, CopyrightGarbage, DependencyGraph, LicenseFileNotice, LicenseFindingsMap,
    LicenseFindingsMapExt, LicenseNotice, PackageIdentifier, PackageNotice, Provenance,
    ScanResult,
};
use crate::notice_generation::policies::ScannerCriteria;
use crate::notice_generation::services::{
    CopyrightStatementsProcessor, FileMatcher, NoticeRenderer,
};
use crate::ports::inbound::NoticeGenerationPort;
use crate::ports::outbound::{
    FileArchive, LicenseTextProvider, ProgressReporter, ScanResultsStorage,
};
use crate::shared::error::NoticeError;
use crate::shared::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

/// The notice of one package and, if it is incomplete, why
struct PackageOutcome {
    notice: PackageNotice,
    failure: Option<String>,
}

impl PackageOutcome {
    fn complete(notice: PackageNotice) -> Self {
        Self {
            notice,
            failure: None,
        }
    }

    fn failed(id: &PackageIdentifier, reason: String) -> Self {
        Self {
            notice: PackageNotice::empty(id.clone()),
            failure: Some(reason),
        }
    }
}

/// License files restored from the archive and the licenses they cover
struct ArchivedLicenseFiles {
    notices: Vec<LicenseFileNotice>,
    licenses: BTreeSet<String>,
}

/// GenerateNoticeUseCase - renders the notice for all dependencies of a project
///
/// For every package the newest cached scan result is combined with the
/// archived license files of the scanned source tree. License files are
/// reproduced verbatim; licenses found elsewhere in the sources are listed
/// with their normalized copyrights and full license text.
///
/// # Type Parameters
/// * `S` - ScanResultsStorage implementation
/// * `A` - FileArchive implementation
/// * `L` - LicenseTextProvider implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateNoticeUseCase<S, A, L, PR> {
    storage: S,
    archive: A,
    license_texts: L,
    progress_reporter: PR,
    license_file_matcher: FileMatcher,
}

impl<S, A, L, PR> GenerateNoticeUseCase<S, A, L, PR>
where
    S: ScanResultsStorage,
    A: FileArchive,
    L: LicenseTextProvider,
    PR: ProgressReporter,
{
    /// Creates a new GenerateNoticeUseCase with injected dependencies
    pub fn new(storage: S, archive: A, license_texts: L, progress_reporter: PR) -> Self {
        Self {
            storage,
            archive,
            license_texts,
            progress_reporter,
            license_file_matcher: FileMatcher::license_file_matcher(),
        }
    }

    /// Executes the notice generation use case
    ///
    /// Packages are processed concurrently, at most `request.jobs` at a time,
    /// and rendered in identifier order. A package that cannot be processed
    /// keeps its header and is listed in `NoticeResponse::failed_packages`.
    pub async fn execute(&self, request: NoticeRequest) -> Result<NoticeResponse> {
        if request.jobs == 0 {
            return Err(NoticeError::Validation {
                message: "the number of jobs must be at least 1".to_string(),
            }
            .into());
        }

        let packages: Vec<&PackageIdentifier> = request.graph.packages().collect();
        let total = packages.len();

        self.progress_reporter.report(&format!(
            "📜 Generating notice for {} package(s) of {}",
            total,
            request.graph.root()
        ));

        let outcomes: Vec<PackageOutcome> = stream::iter(packages)
            .map(|id| self.package_outcome(id, &request.graph, &request.copyright_garbage))
            .buffered(request.jobs)
            .enumerate()
            .map(|(index, outcome)| {
                self.progress_reporter.report_progress(
                    index + 1,
                    total,
                    Some(&outcome.notice.id.to_coordinates()),
                );
                outcome
            })
            .collect()
            .await;

        let mut notices = Vec::with_capacity(outcomes.len());
        let mut failed_packages = Vec::new();
        for outcome in outcomes {
            if let Some(reason) = outcome.failure {
                failed_packages.push((outcome.notice.id.clone(), reason));
            }
            notices.push(outcome.notice);
        }

        for (id, reason) in &failed_packages {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: The notice of {} is incomplete: {}",
                id, reason
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Notice generated for {} package(s)",
            total
        ));

        Ok(NoticeResponse {
            content: NoticeRenderer::render_report(&notices),
            package_count: total,
            failed_packages,
        })
    }

    async fn package_outcome(
        &self,
        id: &PackageIdentifier,
        graph: &DependencyGraph,
        garbage: &CopyrightGarbage,
    ) -> PackageOutcome {
        let Some(provenance) = graph.provenance(id) else {
            log::warn!(
                "No provenance known for {}, only the package header is added to the notice.",
                id
            );
            return PackageOutcome::complete(PackageNotice::empty(id.clone()));
        };

        let results = match self
            .storage
            .read(id, provenance, &ScannerCriteria::any())
            .await
        {
            Ok(results) => results,
            Err(e) => {
                log::error!(
                    "Could not read scan results for {} from {}: {:#}",
                    id,
                    self.storage.name(),
                    e
                );
                return PackageOutcome::failed(id, format!("{:#}", e));
            }
        };

        let Some(result) = ScanResult::newest(results) else {
            log::warn!(
                "No scan result found for {}, only the package header is added to the notice.",
                id
            );
            return PackageOutcome::complete(PackageNotice::empty(id.clone()));
        };

        let notice = self
            .package_notice(id, provenance, &result, garbage)
            .await;
        if !notice.has_license_information() {
            log::error!("No license information was added for package {}.", id);
        }
        PackageOutcome::complete(notice)
    }

    async fn package_notice(
        &self,
        id: &PackageIdentifier,
        provenance: &Provenance,
        result: &ScanResult,
        garbage: &CopyrightGarbage,
    ) -> PackageNotice {
        let findings = result.license_findings_map().remove_garbage(garbage);

        let archived = match self
            .archived_license_files(id, provenance, result, &findings, garbage)
            .await
        {
            Ok(archived) => archived,
            Err(e) => {
                log::error!(
                    "Could not restore the archived license files of {}: {:#}",
                    id,
                    e
                );
                ArchivedLicenseFiles {
                    notices: Vec::new(),
                    licenses: BTreeSet::new(),
                }
            }
        };

        let mut licenses = Vec::new();
        for (license, copyrights) in findings.process_statements(garbage) {
            if archived.licenses.contains(&license) {
                continue;
            }
            match self.license_texts.license_text(&license) {
                Some(text) => licenses.push(LicenseNotice {
                    license,
                    copyrights,
                    text,
                }),
                None => log::warn!(
                    "No license text found for license '{}' of {}, it is not added to the notice.",
                    license,
                    id
                ),
            }
        }

        PackageNotice {
            id: id.clone(),
            license_files: archived.notices,
            licenses,
        }
    }

    /// Restores the archive of the package into a scratch directory and builds
    /// a block for each license file in it
    async fn archived_license_files(
        &self,
        id: &PackageIdentifier,
        provenance: &Provenance,
        result: &ScanResult,
        findings: &LicenseFindingsMap,
        garbage: &CopyrightGarbage,
    ) -> Result<ArchivedLicenseFiles> {
        let scratch = tempfile::Builder::new()
            .prefix("notice")
            .tempdir()
            .map_err(|e| NoticeError::storage("create", "scratch directory", e))?;

        let mut archived = ArchivedLicenseFiles {
            notices: Vec::new(),
            licenses: BTreeSet::new(),
        };

        if !self
            .archive
            .unarchive(scratch.path(), &storage_key(id, provenance))
            .await?
        {
            log::info!("No license files archived for {}.", id);
            return Ok(archived);
        }

        for path in self.license_file_paths(scratch.path()) {
            let content = match tokio::fs::read(scratch.path().join(&path)).await {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    log::warn!("Could not read archived file '{}' of {}: {}", path, id, e);
                    continue;
                }
            };

            let licenses = result.licenses_at(&path);
            let copyrights = copyrights_outside_file(
                findings,
                &licenses,
                &result.copyrights_at(&path),
                garbage,
            );
            archived.licenses.extend(licenses);
            archived.notices.push(LicenseFileNotice {
                path,
                content,
                copyrights,
            });
        }

        Ok(archived)
    }

    /// Relative paths of the license files below `root`, sorted
    fn license_file_paths(&self, root: &Path) -> Vec<String> {
        WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable archived entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(root).ok()?;
                let path = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                self.license_file_matcher.matches(&path).then_some(path)
            })
            .collect()
    }
}

/// Copyrights of `licenses` which are not already part of the license file itself
///
/// A normalized statement is dropped as soon as one of the raw statements it
/// was merged from is located in the file, or if it is garbage itself.
fn copyrights_outside_file(
    findings: &LicenseFindingsMap,
    licenses: &BTreeSet<String>,
    copyrights_in_file: &BTreeSet<String>,
    garbage: &CopyrightGarbage,
) -> BTreeSet<String> {
    let mut remaining = BTreeSet::new();

    for license in licenses {
        let candidates = findings
            .get(license)
            .into_iter()
            .flatten()
            .chain(copyrights_in_file.iter())
            .cloned();
        let processed = CopyrightStatementsProcessor::process(candidates);

        remaining.extend(
            processed
                .processed
                .into_iter()
                .filter(|(_, sources)| !sources.iter().any(|s| copyrights_in_file.contains(s)))
                .map(|(statement, _)| statement),
        );
        remaining.extend(processed.unprocessed.difference(copyrights_in_file).cloned());
    }

    CopyrightStatementsProcessor::process(remaining)
        .all_statements()
        .into_iter()
        .filter(|statement| !garbage.contains(statement))
        .collect()
}

#[async_trait(?Send)]
impl<S, A, L, PR> NoticeGenerationPort for GenerateNoticeUseCase<S, A, L, PR>
where
    S: ScanResultsStorage,
    A: FileArchive,
    L: LicenseTextProvider,
    PR: ProgressReporter,
{
    async fn generate_notice(&self, request: NoticeRequest) -> Result<NoticeResponse> {
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests;
