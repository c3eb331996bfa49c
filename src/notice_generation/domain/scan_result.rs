use super::findings::{merge_copyright_findings, merge_license_findings};
use super::{
    CopyrightFinding, LicenseFinding, LicenseFindingsMap, PackageIdentifier, Provenance,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// ScannerDetails - name, version and configuration of the scanner that produced a result
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScannerDetails {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub configuration: String,
}

impl ScannerDetails {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        configuration: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            configuration: configuration.into(),
        }
    }
}

impl fmt::Display for ScannerDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// ScanResult aggregate - the findings of one scanner run over one provenance
///
/// License findings are unique by license; construction and deserialization
/// both merge duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawScanResult")]
pub struct ScanResult {
    package_id: PackageIdentifier,
    provenance: Provenance,
    scanner: ScannerDetails,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    license_findings: BTreeSet<LicenseFinding>,
    copyright_findings: BTreeSet<CopyrightFinding>,
}

#[derive(Deserialize)]
struct RawScanResult {
    package_id: PackageIdentifier,
    provenance: Provenance,
    scanner: ScannerDetails,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    #[serde(default)]
    license_findings: Vec<LicenseFinding>,
    #[serde(default)]
    copyright_findings: Vec<CopyrightFinding>,
}

impl From<RawScanResult> for ScanResult {
    fn from(raw: RawScanResult) -> Self {
        ScanResult::new(
            raw.package_id,
            raw.provenance,
            raw.scanner,
            raw.start_time,
            raw.end_time,
            raw.license_findings,
            raw.copyright_findings,
        )
    }
}

impl ScanResult {
    pub fn new(
        package_id: PackageIdentifier,
        provenance: Provenance,
        scanner: ScannerDetails,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        license_findings: impl IntoIterator<Item = LicenseFinding>,
        copyright_findings: impl IntoIterator<Item = CopyrightFinding>,
    ) -> Self {
        Self {
            package_id,
            provenance,
            scanner,
            start_time,
            end_time,
            license_findings: merge_license_findings(license_findings),
            copyright_findings: merge_copyright_findings(copyright_findings),
        }
    }

    pub fn package_id(&self) -> &PackageIdentifier {
        &self.package_id
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn scanner(&self) -> &ScannerDetails {
        &self.scanner
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn license_findings(&self) -> &BTreeSet<LicenseFinding> {
        &self.license_findings
    }

    pub fn copyright_findings(&self) -> &BTreeSet<CopyrightFinding> {
        &self.copyright_findings
    }

    /// Licenses mapped to the raw statements of their attributed copyrights
    pub fn license_findings_map(&self) -> LicenseFindingsMap {
        self.license_findings
            .iter()
            .map(|finding| {
                let statements = finding
                    .copyrights
                    .iter()
                    .map(|c| c.statement.clone())
                    .collect();
                (finding.license.clone(), statements)
            })
            .collect()
    }

    /// Licenses with at least one location in the file at `path`
    pub fn licenses_at(&self, path: &str) -> BTreeSet<String> {
        self.license_findings
            .iter()
            .filter(|f| f.is_located_at(path))
            .map(|f| f.license.clone())
            .collect()
    }

    /// The most recent of `results` by end time; equal times fall back to the scanner details
    pub fn newest(results: impl IntoIterator<Item = ScanResult>) -> Option<ScanResult> {
        results.into_iter().max_by(|a, b| {
            a.end_time
                .cmp(&b.end_time)
                .then_with(|| a.scanner.cmp(&b.scanner))
        })
    }

    /// Copyright statements with at least one location in the file at `path`
    pub fn copyrights_at(&self, path: &str) -> BTreeSet<String> {
        self.copyright_findings
            .iter()
            .chain(self.license_findings.iter().flat_map(|f| f.copyrights.iter()))
            .filter(|c| c.is_located_at(path))
            .map(|c| c.statement.clone())
            .collect()
    }
}
