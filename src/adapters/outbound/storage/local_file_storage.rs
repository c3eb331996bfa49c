use crate::ports::outbound::FileStorage;
use crate::shared::error::NoticeError;
use crate::shared::security::validate_storage_path;
use crate::shared::Result;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// LocalFileStorage adapter storing blobs as files below a root directory
///
/// Writes go to a uniquely named sibling file first and are renamed into
/// place, so readers never observe a partially written blob.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    directory: PathBuf,
}

impl LocalFileStorage {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        validate_storage_path(path)?;
        Ok(self.directory.join(path))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let file = self.resolve(path)?;
        match tokio::fs::read(&file).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NoticeError::storage("read", file.display().to_string(), e).into()),
        }
    }

    async fn write(&self, path: &str, content: Vec<u8>) -> Result<()> {
        let file = self.resolve(path)?;
        let parent = file.parent().unwrap_or(&self.directory).to_path_buf();
        tokio::fs::create_dir_all(&parent)
            .await
            .map_err(|e| NoticeError::storage("write", parent.display().to_string(), e))?;

        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp = parent.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        if let Err(e) = tokio::fs::write(&temp, &content).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(NoticeError::storage("write", temp.display().to_string(), e).into());
        }

        if let Err(e) = tokio::fs::rename(&temp, &file).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(NoticeError::storage("write", file.display().to_string(), e).into());
        }

        log::debug!("Stored {} bytes at {}", content.len(), file.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.directory.display().to_string()
    }
}
