mod scanner_criteria;

pub use scanner_criteria::{ScannerCriteria, ScannerVersion};
