use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// Abstracts where a rendered notice or listing ends up (stdout, a file).
pub trait OutputPresenter {
    /// Presents `content` unchanged
    ///
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}
