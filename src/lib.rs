//! notice-kit - license compliance toolkit
//!
//! Caches license scan results per package and provenance, archives the
//! license files of scanned source trees, and renders a NOTICE file covering
//! every dependency of a project. The library follows hexagonal architecture
//! and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`notice_generation`): Package identifiers, scan results,
//!   copyright normalization and notice rendering
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Storage backends, archiver, scanner and console
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use notice_kit::prelude::*;
//! use std::path::{Path, PathBuf};
//!
//! # async fn example() -> Result<()> {
//! let storage = SqliteScanStorage::new("results.db").await?;
//! let archiver = FileArchiver::new(
//!     FileMatcher::license_file_matcher(),
//!     LocalFileStorage::new("archive"),
//! );
//! let use_case = GenerateNoticeUseCase::new(
//!     storage,
//!     archiver,
//!     DirectoryLicenseTextProvider::new(vec![PathBuf::from("license-texts")]),
//!     StderrProgressReporter::new(),
//! );
//!
//! let graph = FileSystemReader::new().read_analyzer_result(Path::new("analyzer-result.json"))?;
//! let response = use_case
//!     .execute(NoticeRequest::new(graph, CopyrightGarbage::default()))
//!     .await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod notice_generation;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::archive::FileArchiver;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::license_texts::{
        DirectoryLicenseTextProvider, MapLicenseTextProvider,
    };
    pub use crate::adapters::outbound::scanner::CommandScanner;
    pub use crate::adapters::outbound::storage::{
        FileBasedScanStorage, HttpFileStorage, LocalFileStorage, SqliteScanStorage,
    };
    pub use crate::application::dto::{
        ListCopyrightsRequest, NoticeRequest, NoticeResponse, ScanRequest, ScanResponse,
    };
    pub use crate::application::use_cases::{
        GenerateNoticeUseCase, ListCopyrightsUseCase, ScanPackageUseCase,
    };
    pub use crate::notice_generation::domain::{
        storage_key, CopyrightFinding, CopyrightGarbage, DependencyGraph, LicenseFinding,
        PackageIdentifier, Provenance, ScanResult, ScannerDetails, TextLocation,
    };
    pub use crate::notice_generation::policies::{ScannerCriteria, ScannerVersion};
    pub use crate::notice_generation::services::{
        CopyrightStatementsProcessor, FileMatcher, NoticeRenderer,
    };
    pub use crate::ports::inbound::NoticeGenerationPort;
    pub use crate::ports::outbound::{
        AnalyzerResultReader, CopyrightGarbageReader, FileArchive, FileStorage,
        LicenseTextProvider, OutputPresenter, ProgressReporter, ScanResultsStorage, Scanner,
    };
    pub use crate::shared::Result;
}
