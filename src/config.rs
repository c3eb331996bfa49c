//! Configuration file support for notice-kit.
//!
//! Provides YAML-based configuration through `notice-kit.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::notice_generation::services::FileMatcher;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "notice-kit.config.yml";

/// Default location of archived license files
const DEFAULT_ARCHIVE_DIR: &str = ".notice-kit/archive";

/// Default location of cached scan results
const DEFAULT_SCAN_RESULTS_DIR: &str = ".notice-kit/scan-results";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub scanner: Option<ScannerConfig>,
    pub archive: Option<ArchiveConfig>,
    pub storage: Option<ScanStorageConfig>,
    /// YAML file listing copyright statements to ignore
    pub copyright_garbage: Option<PathBuf>,
    /// Directory with one file per license id
    pub license_texts: Option<PathBuf>,
    pub jobs: Option<usize>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// The external scan command and the details recorded in its results.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Program and leading arguments; the source directory is appended
    pub command: Vec<String>,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub configuration: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Globs selecting the files to archive; the license file names by default
    pub patterns: Option<Vec<String>>,
    pub storage: Option<FileStorageConfig>,
}

/// A blob store; exactly one of the fields must be set.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct FileStorageConfig {
    pub local: Option<LocalStorageConfig>,
    pub http: Option<HttpStorageConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LocalStorageConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HttpStorageConfig {
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// The scan result cache; exactly one of the fields must be set.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ScanStorageConfig {
    pub file_based: Option<FileStorageConfig>,
    pub sqlite: Option<SqliteStorageConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SqliteStorageConfig {
    pub path: PathBuf,
}

/// The selected blob store of a [`FileStorageConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStorageBackend<'a> {
    Local(&'a LocalStorageConfig),
    Http(&'a HttpStorageConfig),
}

/// The selected cache backend of a [`ScanStorageConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStorageBackend<'a> {
    FileBased(FileStorageBackend<'a>),
    Sqlite(&'a SqliteStorageConfig),
}

impl FileStorageConfig {
    pub fn local(directory: impl Into<PathBuf>) -> Self {
        Self {
            local: Some(LocalStorageConfig {
                directory: directory.into(),
            }),
            http: None,
        }
    }

    /// The configured backend
    ///
    /// # Errors
    /// Returns an error unless exactly one backend is configured
    pub fn backend(&self, section: &str) -> Result<FileStorageBackend<'_>> {
        match (&self.local, &self.http) {
            (Some(local), None) => Ok(FileStorageBackend::Local(local)),
            (None, Some(http)) => Ok(FileStorageBackend::Http(http)),
            (Some(_), Some(_)) => bail!(
                "Invalid config: {} configures both 'local' and 'http' storage.\n\n\
                 💡 Hint: Keep exactly one of the two.",
                section
            ),
            (None, None) => bail!(
                "Invalid config: {} configures no storage.\n\n\
                 💡 Hint: Add either 'local: {{ directory: ... }}' or 'http: {{ url: ... }}'.",
                section
            ),
        }
    }
}

impl ScanStorageConfig {
    /// The configured backend
    ///
    /// # Errors
    /// Returns an error unless exactly one backend is configured
    pub fn backend(&self) -> Result<ScanStorageBackend<'_>> {
        match (&self.file_based, &self.sqlite) {
            (Some(file_based), None) => Ok(ScanStorageBackend::FileBased(
                file_based.backend("storage.file_based")?,
            )),
            (None, Some(sqlite)) => Ok(ScanStorageBackend::Sqlite(sqlite)),
            (Some(_), Some(_)) => bail!(
                "Invalid config: storage configures both 'file_based' and 'sqlite'.\n\n\
                 💡 Hint: Scan results are kept in exactly one backend."
            ),
            (None, None) => bail!(
                "Invalid config: storage configures no backend.\n\n\
                 💡 Hint: Add either 'file_based' or 'sqlite'."
            ),
        }
    }
}

impl ConfigFile {
    /// The archive storage, `.notice-kit/archive` if none is configured
    pub fn archive_storage(&self) -> FileStorageConfig {
        self.archive
            .as_ref()
            .and_then(|a| a.storage.clone())
            .unwrap_or_else(|| FileStorageConfig::local(DEFAULT_ARCHIVE_DIR))
    }

    /// The scan result cache, `.notice-kit/scan-results` if none is configured
    pub fn scan_storage(&self) -> ScanStorageConfig {
        self.storage.clone().unwrap_or_else(|| ScanStorageConfig {
            file_based: Some(FileStorageConfig::local(DEFAULT_SCAN_RESULTS_DIR)),
            sqlite: None,
        })
    }

    /// The archive patterns, `None` meaning the license file names
    pub fn archive_patterns(&self) -> Option<&[String]> {
        self.archive.as_ref().and_then(|a| a.patterns.as_deref())
    }
}

/// Expands a leading `~/` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref scanner) = config.scanner {
        if scanner.command.is_empty() || scanner.command[0].trim().is_empty() {
            bail!(
                "Invalid config: scanner.command must not be empty.\n\n\
                 💡 Hint: Give the program and its arguments as a list, e.g. [\"scancode-wrapper\", \"--json\"]."
            );
        }
        if scanner.name.trim().is_empty() || scanner.version.trim().is_empty() {
            bail!(
                "Invalid config: scanner.name and scanner.version must not be empty.\n\n\
                 💡 Hint: They identify cached results, e.g. name: ScanCode, version: 3.0.2."
            );
        }
    }

    if let Some(ref archive) = config.archive {
        if let Some(ref storage) = archive.storage {
            storage.backend("archive.storage")?;
        }
        if let Some(ref patterns) = archive.patterns {
            FileMatcher::new(patterns.iter().cloned())?;
        }
    }

    if let Some(ref storage) = config.storage {
        storage.backend()?;
    }

    if config.jobs == Some(0) {
        bail!(
            "Invalid config: jobs must be at least 1.\n\n\
             💡 Hint: jobs is the number of packages processed at the same time."
        );
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        log::warn!("Unknown config field '{}' will be ignored.", key);
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
