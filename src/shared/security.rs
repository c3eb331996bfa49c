use crate::shared::Result;
use std::fs;
use std::path::{Component, Path};

/// Maximum size of any input file read into memory (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Security
/// Uses `symlink_metadata()` so the symlink itself is inspected, not its target.
///
/// # Errors
/// Returns an error if the path doesn't exist, is a symbolic link or is not a
/// regular file.
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Reads a text file after the regular-file and size checks.
pub fn safe_read_to_string(path: &Path, file_description: &str) -> Result<String> {
    validate_regular_file(path, file_description)?;
    fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_description, e))
}

/// Validates that a storage path stays below the storage root.
///
/// Storage paths are always relative and use `/` as separator. Absolute paths
/// and `..` components are rejected so a key can never address a file outside
/// the configured directory or URL prefix.
pub fn validate_storage_path(path: &str) -> Result<()> {
    if path.is_empty() {
        anyhow::bail!("Storage path must not be empty");
    }

    if path.contains('\\') || path.contains('\0') {
        anyhow::bail!("Security: storage path '{}' contains illegal characters", path);
    }

    let ok = Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !ok || path.starts_with('/') {
        anyhow::bail!(
            "Security: storage path '{}' must be relative and must not contain '..'",
            path
        );
    }

    Ok(())
}
