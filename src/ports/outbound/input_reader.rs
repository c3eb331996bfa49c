use crate::notice_generation::domain::{CopyrightGarbage, DependencyGraph};
use crate::shared::Result;
use std::path::Path;

/// AnalyzerResultReader port for reading the resolved dependency graph of a project
///
/// The analyzer result names the project, its packages with their provenances
/// and the dependency edges between them.
pub trait AnalyzerResultReader {
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON or
    /// contains malformed package identifiers
    fn read_analyzer_result(&self, path: &Path) -> Result<DependencyGraph>;
}

/// CopyrightGarbageReader port for reading the list of bogus copyright statements
pub trait CopyrightGarbageReader {
    fn read_copyright_garbage(&self, path: &Path) -> Result<CopyrightGarbage>;
}
