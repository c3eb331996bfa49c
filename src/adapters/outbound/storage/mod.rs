/// Storage adapters - blob storages and scan result caches built on them
mod file_based_scan_storage;
mod http_file_storage;
mod local_file_storage;
mod sqlite_scan_storage;

pub use file_based_scan_storage::FileBasedScanStorage;
pub use http_file_storage::HttpFileStorage;
pub use local_file_storage::LocalFileStorage;
pub use sqlite_scan_storage::SqliteScanStorage;
