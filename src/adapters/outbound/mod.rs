/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod archive;
pub mod console;
pub mod filesystem;
pub mod license_texts;
pub mod scanner;
pub mod storage;
