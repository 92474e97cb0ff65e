// src/uploads/file.rs

use bytes::Bytes;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

/// Where the bytes of an upload live.
#[derive(Debug, Clone)]
enum UploadSource {
    Memory(Bytes),
    /// A file owned by the caller; never removed by this crate.
    Disk(PathBuf),
    /// A temporary file written while parsing a request that exceeded the
    /// in-memory budget.
    Spilled(PathBuf),
}

/// Handle to one uploaded file. Cloning is cheap: in-memory content is
/// reference counted and on-disk content is referenced by path.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub size: i64,
    /// Content type declared by the client. Informational only; validation
    /// sniffs the content instead.
    pub content_type: Option<String>,
    source: UploadSource,
}

impl UploadedFile {
    pub fn from_bytes(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        Self {
            filename: filename.into(),
            size: content.len() as i64,
            content_type: None,
            source: UploadSource::Memory(content),
        }
    }

    /// Wraps a file already on disk. `size` is taken as given so callers can
    /// reuse a length they already know.
    pub fn from_path(filename: impl Into<String>, path: impl Into<PathBuf>, size: i64) -> Self {
        Self {
            filename: filename.into(),
            size,
            content_type: None,
            source: UploadSource::Disk(path.into()),
        }
    }

    pub(crate) fn spilled(filename: String, path: PathBuf, size: i64) -> Self {
        Self {
            filename,
            size,
            content_type: None,
            source: UploadSource::Spilled(path),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Path of a temporary spill file, if this upload has one.
    pub fn spill_path(&self) -> Option<&Path> {
        match &self.source {
            UploadSource::Spilled(path) => Some(path),
            _ => None,
        }
    }

    /// Opens a fresh reader over the upload's content.
    pub fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        match &self.source {
            UploadSource::Memory(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            UploadSource::Disk(path) | UploadSource::Spilled(path) => {
                Ok(Box::new(File::open(path)?))
            }
        }
    }

    /// Lower-cased extension of the filename's last path component,
    /// including the leading dot. Empty when there is none.
    pub fn extension(&self) -> String {
        file_extension(&self.filename).to_lowercase()
    }
}

/// Returns the suffix of `filename` starting at the final dot of its last
/// path component, or an empty string.
pub fn file_extension(filename: &str) -> &str {
    let base = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);

    match base.rfind('.') {
        Some(idx) => &base[idx..],
        None => "",
    }
}
