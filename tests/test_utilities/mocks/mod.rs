/// Mock implementations for testing
mod mock_file_storage;
mod mock_progress_reporter;
mod mock_scan_results_storage;
mod mock_scanner;

pub use mock_file_storage::MockFileStorage;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_scan_results_storage::MockScanResultsStorage;
pub use mock_scanner::MockScanner;
