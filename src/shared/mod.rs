/// Shared utilities - error types, result alias and security checks
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
