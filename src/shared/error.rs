use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// A run that produced at least partial output exits with `Success`; per-package
/// failures are reported on stderr instead of failing the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Output was produced (possibly with per-package gaps)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// The run could not produce any output
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for scanning, archiving and notice generation.
///
/// Plumbing code works with `anyhow::Error`; callers that need to react to a
/// specific condition (e.g. a corrupt archive) downcast to this type.
#[derive(Debug, Error)]
pub enum NoticeError {
    #[error("Malformed package identifier: '{coordinates}'\nReason: {reason}\n\n💡 Hint: Use the form 'type:namespace:name:version' (e.g. 'npm:@nestjs:platform-express:6.2.3')")]
    MalformedIdentifier { coordinates: String, reason: String },

    #[error("Archive at '{storage_path}' exists but cannot be decoded\nDetails: {details}")]
    ArchiveCorrupt {
        storage_path: String,
        details: String,
    },

    #[error("Storage operation '{operation}' failed for '{path}'\nDetails: {details}")]
    Storage {
        operation: &'static str,
        path: String,
        details: String,
    },

    #[error("Scanner '{scanner}' failed for package {package}\nDetails: {details}\n\n💡 Hint: Check that the scanner command is installed and runs on its own")]
    ScanEngineFailure {
        scanner: String,
        package: String,
        details: String,
    },

    #[error("Invalid configuration: {message}\n\n💡 Hint: {hint}")]
    Configuration { message: String, hint: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Invalid input path: {path}\nReason: {reason}\n\n💡 Hint: Please specify an existing directory")]
    InvalidInputPath { path: PathBuf, reason: String },

    /// Validation error for value objects
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl NoticeError {
    pub fn storage(operation: &'static str, path: impl Into<String>, details: impl fmt::Display) -> Self {
        NoticeError::Storage {
            operation,
            path: path.into(),
            details: details.to_string(),
        }
    }
}
