//! File capture: the single document the user picked or dropped.
//!
//! A [`SelectedFile`] only records *where* the bytes live. The full read
//! happens later, once, in [`SelectedFile::read`], so choosing a file is cheap
//! and a file that disappears between selection and submission surfaces as a
//! read error at submit time rather than at pick time.

use crate::error::SubmitError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Where the bytes of a selected file come from.
#[derive(Debug, Clone)]
pub enum FileSource {
    /// A file on the local file system.
    Path(PathBuf),
    /// Bytes already held in memory (drag-and-drop payloads, tests).
    Memory(Arc<[u8]>),
}

/// A user-selected document. Any type and any size is accepted here; the
/// recognition service is the effective validator.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    name: String,
    size: u64,
    source: FileSource,
}

impl SelectedFile {
    /// Select a file on disk. The size comes from its metadata.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SubmitError> {
        let path = path.as_ref().to_path_buf();
        let meta = std::fs::metadata(&path).map_err(|source| SubmitError::Read {
            path: path.clone(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!("Selected {} ({} bytes)", path.display(), meta.len());
        Ok(Self {
            name,
            size: meta.len(),
            source: FileSource::Path(path),
        })
    }

    /// Select an in-memory document.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes: Arc<[u8]> = bytes.into();
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes as known at selection time.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Read the full content in one terminal operation.
    pub async fn read(&self) -> Result<Vec<u8>, SubmitError> {
        match &self.source {
            FileSource::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| SubmitError::Read {
                        path: path.clone(),
                        source,
                    })
            }
            FileSource::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }
}

/// Holds the one active file. Every capture replaces the previous one.
#[derive(Debug, Default)]
pub struct FileSelection {
    active: Option<SelectedFile>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Click-to-browse: the chosen file replaces any previous selection.
    pub fn browse(&mut self, file: SelectedFile) -> &SelectedFile {
        self.active.insert(file)
    }

    /// Drag-and-drop: keeps only the first dropped file.
    ///
    /// Returns `None` and keeps the current selection when nothing was dropped.
    pub fn drop_files<I>(&mut self, files: I) -> Option<&SelectedFile>
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        let mut files = files.into_iter();
        let first = files.next()?;
        let ignored = files.count();
        if ignored > 0 {
            debug!("Drop contained {} extra file(s); keeping only '{}'", ignored, first.name);
        }
        Some(&*self.active.insert(first))
    }

    pub fn active(&self) -> Option<&SelectedFile> {
        self.active.as_ref()
    }
}
