/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to reach storage, the scanner, the file system and the console.
pub mod file_archive;
pub mod file_storage;
pub mod input_reader;
pub mod license_text_provider;
pub mod output_presenter;
pub mod progress_reporter;
pub mod scan_results_storage;
pub mod scanner;

pub use file_archive::FileArchive;
pub use file_storage::FileStorage;
pub use input_reader::{AnalyzerResultReader, CopyrightGarbageReader};
pub use license_text_provider::LicenseTextProvider;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use scan_results_storage::ScanResultsStorage;
pub use scanner::Scanner;
