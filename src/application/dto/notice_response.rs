use crate::notice_generation::domain::PackageIdentifier;

/// NoticeResponse - the rendered notice and the packages that could not be fully processed
#[derive(Debug, Clone)]
pub struct NoticeResponse {
    /// The complete notice text
    pub content: String,
    pub package_count: usize,
    /// Packages whose notice is incomplete, with the reason
    pub failed_packages: Vec<(PackageIdentifier, String)>,
}

impl NoticeResponse {
    pub fn is_complete(&self) -> bool {
        self.failed_packages.is_empty()
    }
}
