use crate::notice_generation::domain::{
    CopyrightGarbage, DependencyGraph, PackageIdentifier, Provenance,
};
use crate::ports::outbound::{AnalyzerResultReader, CopyrightGarbageReader};
use crate::shared::error::NoticeError;
use crate::shared::security::safe_read_to_string;
use crate::shared::Result;
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct AnalyzerResultFile {
    project: PackageIdentifier,
    #[serde(default)]
    packages: Vec<AnalyzedPackage>,
    #[serde(default)]
    dependencies: BTreeMap<PackageIdentifier, Vec<PackageIdentifier>>,
}

#[derive(Debug, Deserialize)]
struct AnalyzedPackage {
    id: PackageIdentifier,
    #[serde(default)]
    provenance: Option<Provenance>,
}

/// FileSystemReader adapter for the input files of a notice run
///
/// Implements both [`AnalyzerResultReader`] and [`CopyrightGarbageReader`].
/// Every file goes through the symlink and size checks before it is read.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn read(&self, path: &Path, description: &str) -> Result<String> {
        if !path.exists() {
            return Err(NoticeError::FileReadError {
                path: path.to_path_buf(),
                details: format!("{} does not exist", description),
            }
            .into());
        }
        safe_read_to_string(path, description).map_err(|e| {
            NoticeError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerResultReader for FileSystemReader {
    fn read_analyzer_result(&self, path: &Path) -> Result<DependencyGraph> {
        let content = self.read(path, "analyzer result")?;
        let file: AnalyzerResultFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse analyzer result '{}'", path.display()))?;

        let mut graph = DependencyGraph::new(file.project);
        for package in file.packages {
            graph.add_package(package.id, package.provenance);
        }
        for (parent, children) in file.dependencies {
            for child in children {
                graph.add_dependency(parent.clone(), child);
            }
        }

        log::debug!(
            "Read analyzer result for {} with {} package(s)",
            graph.root(),
            graph.total_package_count()
        );
        Ok(graph)
    }
}

impl CopyrightGarbageReader for FileSystemReader {
    fn read_copyright_garbage(&self, path: &Path) -> Result<CopyrightGarbage> {
        let content = self.read(path, "copyright garbage file")?;
        let garbage: CopyrightGarbage = serde_yaml_ng::from_str(&content).with_context(|| {
            format!("Failed to parse copyright garbage file '{}'", path.display())
        })?;
        log::debug!("Loaded {} copyright garbage statement(s)", garbage.len());
        Ok(garbage)
    }
}
