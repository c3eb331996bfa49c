use crate::notice_generation::domain::{
    CopyrightFinding, LicenseFinding, PackageIdentifier, Provenance, ScanResult, ScannerDetails,
    TextLocation,
};
use crate::ports::outbound::Scanner;
use crate::shared::error::NoticeError;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tokio::process::Command;

#[derive(Debug, Default, Deserialize)]
struct RawFindings {
    #[serde(default)]
    licenses: Vec<RawLicense>,
    #[serde(default)]
    copyrights: Vec<RawCopyright>,
}

#[derive(Debug, Deserialize)]
struct RawLicense {
    license: String,
    path: String,
    start_line: u32,
    end_line: u32,
}

#[derive(Debug, Deserialize)]
struct RawCopyright {
    statement: String,
    path: String,
    start_line: u32,
    end_line: u32,
}

/// CommandScanner adapter running an external scanner executable
///
/// The configured command is invoked with the source directory appended as
/// its last argument and must print its findings as JSON on stdout:
///
/// ```json
/// {"licenses":   [{"license": "MIT", "path": "LICENSE", "start_line": 1, "end_line": 21}],
///  "copyrights": [{"statement": "Copyright 2018 Foo", "path": "LICENSE", "start_line": 3, "end_line": 3}]}
/// ```
///
/// Copyrights are attributed to every license found in the same file.
pub struct CommandScanner {
    command: Vec<String>,
    details: ScannerDetails,
}

impl CommandScanner {
    pub fn new(command: Vec<String>, details: ScannerDetails) -> Result<Self> {
        if command.first().map_or(true, |c| c.trim().is_empty()) {
            return Err(NoticeError::Configuration {
                message: "the scanner command is empty".to_string(),
                hint: "Set 'scanner.command' in the config file, e.g. [\"scancode-wrapper\"]"
                    .to_string(),
            }
            .into());
        }
        Ok(Self { command, details })
    }

    fn failure(&self, id: &PackageIdentifier, details: impl Into<String>) -> NoticeError {
        NoticeError::ScanEngineFailure {
            scanner: self.details.to_string(),
            package: id.to_coordinates(),
            details: details.into(),
        }
    }
}

#[async_trait]
impl Scanner for CommandScanner {
    fn details(&self) -> &ScannerDetails {
        &self.details
    }

    async fn scan(
        &self,
        source_dir: &Path,
        id: &PackageIdentifier,
        provenance: &Provenance,
    ) -> Result<ScanResult> {
        let start_time = Utc::now();
        log::info!("Scanning {} with {}", id, self.details);

        let output = Command::new(&self.command[0])
            .args(&self.command[1..])
            .arg(source_dir)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| self.failure(id, format!("failed to run '{}': {}", self.command[0], e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self
                .failure(id, format!("{}: {}", output.status, stderr.trim()))
                .into());
        }

        let raw: RawFindings = serde_json::from_slice(&output.stdout)
            .map_err(|e| self.failure(id, format!("unexpected scanner output: {}", e)))?;
        let (license_findings, copyright_findings) = associate_findings(raw, source_dir)
            .map_err(|e| self.failure(id, e.to_string()))?;

        let end_time = Utc::now();
        log::debug!(
            "Scanner found {} license(s) and {} copyright(s) for {}",
            license_findings.len(),
            copyright_findings.len(),
            id
        );

        Ok(ScanResult::new(
            id.clone(),
            provenance.clone(),
            self.details.clone(),
            start_time,
            end_time,
            license_findings,
            copyright_findings,
        ))
    }
}

/// Paths relative to the scanned directory, whatever form the scanner printed
fn relative_path(path: &str, source_dir: &Path) -> String {
    let relative = Path::new(path)
        .strip_prefix(source_dir)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| path.to_string());
    relative
        .replace('\\', "/")
        .trim_start_matches("./")
        .trim_start_matches('/')
        .to_string()
}

fn associate_findings(
    raw: RawFindings,
    source_dir: &Path,
) -> std::result::Result<(Vec<LicenseFinding>, Vec<CopyrightFinding>), NoticeError> {
    let mut copyrights_by_path: BTreeMap<String, Vec<CopyrightFinding>> = BTreeMap::new();
    let mut copyright_findings = Vec::new();
    for c in raw.copyrights {
        let path = relative_path(&c.path, source_dir);
        let location = TextLocation::new(path.clone(), c.start_line, c.end_line)?;
        let finding = CopyrightFinding::new(c.statement, [location].into());
        copyrights_by_path.entry(path).or_default().push(finding.clone());
        copyright_findings.push(finding);
    }

    let mut license_findings = Vec::new();
    for l in raw.licenses {
        let path = relative_path(&l.path, source_dir);
        let location = TextLocation::new(path.clone(), l.start_line, l.end_line)?;
        let copyrights: BTreeSet<CopyrightFinding> = copyrights_by_path
            .get(&path)
            .map(|c| c.iter().cloned().collect())
            .unwrap_or_default();
        license_findings.push(LicenseFinding::new(l.license, [location].into(), copyrights));
    }

    Ok((license_findings, copyright_findings))
}
