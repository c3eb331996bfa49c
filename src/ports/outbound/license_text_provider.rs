/// LicenseTextProvider port for looking up the full text of a license
pub trait LicenseTextProvider: Send + Sync {
    /// The text of `license`, or `None` if it is unknown
    fn license_text(&self, license: &str) -> Option<String>;

    fn has_license_text(&self, license: &str) -> bool {
        self.license_text(license).is_some()
    }
}
