use crate::shared::Result;
use async_trait::async_trait;

/// FileStorage port for blob storage addressed by relative paths
///
/// Paths are always relative, `/`-separated and never contain `..`.
/// Implementations must make a `write` visible all at once: a concurrent
/// `read` sees either the previous content or the new one, never a mix.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Reads the blob at `path`
    ///
    /// # Returns
    /// `None` if nothing is stored at `path`
    ///
    /// # Errors
    /// Returns an error if the backend is unreachable or the read fails
    async fn read(&self, path: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `content` at `path`, replacing any previous blob
    async fn write(&self, path: &str, content: Vec<u8>) -> Result<()>;

    /// Human readable location of the storage root, used in log messages
    fn location(&self) -> String;
}

#[async_trait]
impl<T: FileStorage + ?Sized> FileStorage for Box<T> {
    async fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        (**self).read(path).await
    }

    async fn write(&self, path: &str, content: Vec<u8>) -> Result<()> {
        (**self).write(path, content).await
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
