use crate::ports::outbound::LicenseTextProvider;
use crate::shared::security::safe_read_to_string;
use std::path::{Path, PathBuf};

/// DirectoryLicenseTextProvider adapter reading `<directory>/<license id>` files
///
/// License ids that could name a file outside the directory are never looked up.
#[derive(Debug, Clone)]
pub struct DirectoryLicenseTextProvider {
    directories: Vec<PathBuf>,
}

impl DirectoryLicenseTextProvider {
    /// Directories are searched in order; the first hit wins
    pub fn new(directories: Vec<PathBuf>) -> Self {
        Self { directories }
    }

    fn is_safe_id(license: &str) -> bool {
        !license.is_empty()
            && license != "."
            && license != ".."
            && !license.contains(['/', '\\', '\0'])
    }

    fn read_from(directory: &Path, license: &str) -> Option<String> {
        let path = directory.join(license);
        if !path.is_file() {
            return None;
        }
        match safe_read_to_string(&path, "license text") {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Could not read license text '{}': {}", path.display(), e);
                None
            }
        }
    }
}

impl LicenseTextProvider for DirectoryLicenseTextProvider {
    fn license_text(&self, license: &str) -> Option<String> {
        if !Self::is_safe_id(license) {
            return None;
        }
        self.directories
            .iter()
            .find_map(|directory| Self::read_from(directory, license))
    }
}
