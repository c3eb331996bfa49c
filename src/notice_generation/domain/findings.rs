use super::CopyrightGarbage;
use crate::notice_generation::services::CopyrightStatementsProcessor;
use crate::shared::error::NoticeError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// TextLocation value object - a line range within a file of the scanned source
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTextLocation")]
pub struct TextLocation {
    path: String,
    start_line: u32,
    end_line: u32,
}

#[derive(Deserialize)]
struct RawTextLocation {
    path: String,
    start_line: u32,
    end_line: u32,
}

impl TryFrom<RawTextLocation> for TextLocation {
    type Error = NoticeError;

    fn try_from(raw: RawTextLocation) -> Result<Self, Self::Error> {
        TextLocation::new(raw.path, raw.start_line, raw.end_line)
    }
}

impl TextLocation {
    pub fn new(path: impl Into<String>, start_line: u32, end_line: u32) -> Result<Self, NoticeError> {
        let path = path.into();
        if start_line < 1 {
            return Err(NoticeError::Validation {
                message: format!("start line of '{}' must be at least 1", path),
            });
        }
        if end_line < start_line {
            return Err(NoticeError::Validation {
                message: format!(
                    "end line {} of '{}' is before start line {}",
                    end_line, path, start_line
                ),
            });
        }
        Ok(Self {
            path,
            start_line,
            end_line,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn start_line(&self) -> u32 {
        self.start_line
    }

    pub fn end_line(&self) -> u32 {
        self.end_line
    }
}

/// A copyright statement together with every place it was found
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CopyrightFinding {
    pub statement: String,
    #[serde(default)]
    pub locations: BTreeSet<TextLocation>,
}

impl CopyrightFinding {
    pub fn new(statement: impl Into<String>, locations: BTreeSet<TextLocation>) -> Self {
        Self {
            statement: statement.into(),
            locations,
        }
    }

    pub fn is_located_at(&self, path: &str) -> bool {
        self.locations.iter().any(|l| l.path() == path)
    }
}

/// A detected license with its locations and the copyrights attributed to it
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LicenseFinding {
    pub license: String,
    #[serde(default)]
    pub locations: BTreeSet<TextLocation>,
    #[serde(default)]
    pub copyrights: BTreeSet<CopyrightFinding>,
}

impl LicenseFinding {
    pub fn new(
        license: impl Into<String>,
        locations: BTreeSet<TextLocation>,
        copyrights: BTreeSet<CopyrightFinding>,
    ) -> Self {
        Self {
            license: license.into(),
            locations,
            copyrights,
        }
    }

    pub fn is_located_at(&self, path: &str) -> bool {
        self.locations.iter().any(|l| l.path() == path)
    }
}

/// Merges copyright findings with equal statements, uniting their locations.
pub fn merge_copyright_findings(
    findings: impl IntoIterator<Item = CopyrightFinding>,
) -> BTreeSet<CopyrightFinding> {
    let mut by_statement: BTreeMap<String, BTreeSet<TextLocation>> = BTreeMap::new();
    for finding in findings {
        by_statement
            .entry(finding.statement)
            .or_default()
            .extend(finding.locations);
    }
    by_statement
        .into_iter()
        .map(|(statement, locations)| CopyrightFinding::new(statement, locations))
        .collect()
}

/// Merges license findings so that each license appears exactly once.
pub fn merge_license_findings(
    findings: impl IntoIterator<Item = LicenseFinding>,
) -> BTreeSet<LicenseFinding> {
    let mut by_license: BTreeMap<String, (BTreeSet<TextLocation>, Vec<CopyrightFinding>)> =
        BTreeMap::new();
    for finding in findings {
        let entry = by_license.entry(finding.license).or_default();
        entry.0.extend(finding.locations);
        entry.1.extend(finding.copyrights);
    }
    by_license
        .into_iter()
        .map(|(license, (locations, copyrights))| {
            LicenseFinding::new(license, locations, merge_copyright_findings(copyrights))
        })
        .collect()
}

/// Licenses mapped to the raw copyright statements attributed to them
pub type LicenseFindingsMap = BTreeMap<String, BTreeSet<String>>;

/// Operations on a [`LicenseFindingsMap`] used while rendering notices
pub trait LicenseFindingsMapExt {
    /// Drops every statement listed as garbage
    fn remove_garbage(&self, garbage: &CopyrightGarbage) -> LicenseFindingsMap;

    /// Normalizes the statements of every license. A normalized statement that
    /// is itself listed as garbage is dropped as well
    fn process_statements(&self, garbage: &CopyrightGarbage) -> LicenseFindingsMap;
}

impl LicenseFindingsMapExt for LicenseFindingsMap {
    fn remove_garbage(&self, garbage: &CopyrightGarbage) -> LicenseFindingsMap {
        self.iter()
            .map(|(license, copyrights)| {
                let kept = copyrights
                    .iter()
                    .filter(|c| !garbage.contains(c))
                    .cloned()
                    .collect();
                (license.clone(), kept)
            })
            .collect()
    }

    fn process_statements(&self, garbage: &CopyrightGarbage) -> LicenseFindingsMap {
        self.iter()
            .map(|(license, copyrights)| {
                let processed = CopyrightStatementsProcessor::process(copyrights.iter().cloned());
                let kept = processed
                    .all_statements()
                    .into_iter()
                    .filter(|statement| !garbage.contains(statement))
                    .collect();
                (license.clone(), kept)
            })
            .collect()
    }
}
