use crate::notice_generation::services::FileMatcher;
use crate::ports::outbound::{FileArchive, FileStorage};
use crate::shared::error::NoticeError;
use crate::shared::Result;
use async_trait::async_trait;
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const ARCHIVE_FILE_NAME: &str = "archive.zip";

/// FileArchiver - stores the license files of a scanned source tree
///
/// Only regular files whose path relative to the source directory matches the
/// [`FileMatcher`] are archived. Entries are written in path order with fixed
/// timestamps and permissions, so the same tree always yields the same bytes.
pub struct FileArchiver<S: FileStorage> {
    matcher: FileMatcher,
    storage: S,
}

impl<S: FileStorage> FileArchiver<S> {
    pub fn new(matcher: FileMatcher, storage: S) -> Self {
        Self { matcher, storage }
    }

    fn archive_path(storage_path: &str) -> String {
        format!("{}/{}", storage_path.trim_end_matches('/'), ARCHIVE_FILE_NAME)
    }
}

#[async_trait]
impl<S: FileStorage> FileArchive for FileArchiver<S> {
    async fn archive(&self, source_dir: &Path, storage_path: &str) -> Result<usize> {
        let archive_path = Self::archive_path(storage_path);
        let matcher = self.matcher.clone();
        let source_dir = source_dir.to_path_buf();

        let (bytes, count) =
            tokio::task::spawn_blocking(move || create_zip(&source_dir, &matcher)).await??;

        self.storage.write(&archive_path, bytes).await?;
        log::info!("Archived {} file(s) to '{}'", count, archive_path);
        Ok(count)
    }

    async fn unarchive(&self, target_dir: &Path, storage_path: &str) -> Result<bool> {
        let archive_path = Self::archive_path(storage_path);

        let bytes = match self.storage.read(&archive_path).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                log::info!("No archive found at '{}'", archive_path);
                return Ok(false);
            }
            Err(e) => {
                log::warn!("Could not read archive '{}': {:#}", archive_path, e);
                return Ok(false);
            }
        };

        let target_dir = target_dir.to_path_buf();
        let path = archive_path.clone();
        let count =
            tokio::task::spawn_blocking(move || extract_zip(bytes, &target_dir, &path)).await??;

        log::debug!("Extracted {} file(s) from '{}'", count, archive_path);
        Ok(true)
    }
}

fn create_zip(source_dir: &Path, matcher: &FileMatcher) -> Result<(Vec<u8>, usize)> {
    let mut files: Vec<(String, PathBuf)> = WalkDir::new(source_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry below '{}': {}", source_dir.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(source_dir).ok()?;
            let relative = relative_path_string(relative)?;
            matcher
                .matches(&relative)
                .then(|| (relative, entry.path().to_path_buf()))
        })
        .collect();
    files.sort();

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for (relative, path) in &files {
        let content = fs::read(path).map_err(|e| NoticeError::FileReadError {
            path: path.clone(),
            details: e.to_string(),
        })?;
        writer.start_file(relative.as_str(), options)?;
        writer.write_all(&content)?;
    }

    let bytes = writer.finish()?.into_inner();
    Ok((bytes, files.len()))
}

/// `/`-separated form of a relative path, `None` for names that are not valid UTF-8
fn relative_path_string(relative: &Path) -> Option<String> {
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

fn extract_zip(bytes: Vec<u8>, target_dir: &Path, archive_path: &str) -> Result<usize> {
    let corrupt = |details: String| NoticeError::ArchiveCorrupt {
        storage_path: archive_path.to_string(),
        details,
    };

    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| corrupt(e.to_string()))?;
    let mut count = 0;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| corrupt(e.to_string()))?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(corrupt(format!(
                "entry '{}' points outside of the target directory",
                entry.name()
            ))
            .into());
        };
        let out_path = target_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| NoticeError::FileWriteError {
                path: out_path.clone(),
                details: e.to_string(),
            })?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| NoticeError::FileWriteError {
                path: parent.to_path_buf(),
                details: e.to_string(),
            })?;
        }

        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(|e| corrupt(format!("entry '{}': {}", entry.name(), e)))?;
        fs::write(&out_path, content).map_err(|e| NoticeError::FileWriteError {
            path: out_path.clone(),
            details: e.to_string(),
        })?;
        count += 1;
    }

    Ok(count)
}
