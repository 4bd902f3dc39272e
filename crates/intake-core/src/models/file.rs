use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::constants::DEFAULT_CONTENT_TYPE;

pub type BoxAsyncRead = Pin<Box<dyn AsyncRead + Send + Unpin>>;

/// Read/stream capability behind a [`FileHandle`].
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Open a fresh reader positioned at the start of the file.
    async fn open(&self) -> io::Result<BoxAsyncRead>;

    /// Read the whole file into memory.
    async fn read_all(&self) -> io::Result<Vec<u8>> {
        let mut reader = self.open().await?;
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).await?;
        Ok(buffer)
    }
}

/// A file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FileSource for LocalFile {
    async fn open(&self) -> io::Result<BoxAsyncRead> {
        let file = tokio::fs::File::open(&self.path).await?;
        Ok(Box::pin(file))
    }

    async fn read_all(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

/// File contents already held in memory (pasted data, tests).
#[derive(Debug, Clone)]
pub struct InMemoryFile {
    data: Bytes,
}

impl InMemoryFile {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }
}

#[async_trait]
impl FileSource for InMemoryFile {
    async fn open(&self) -> io::Result<BoxAsyncRead> {
        Ok(Box::pin(io::Cursor::new(self.data.clone())))
    }

    async fn read_all(&self) -> io::Result<Vec<u8>> {
        Ok(self.data.to_vec())
    }
}

/// Opaque reference to a locally selected file.
///
/// Produced once by a picker and never mutated afterwards. Cloning shares the
/// underlying source.
#[derive(Clone)]
pub struct FileHandle {
    name: String,
    size: u64,
    mime_type: String,
    path: Option<PathBuf>,
    source: Arc<dyn FileSource>,
}

impl FileHandle {
    pub fn new(
        name: impl Into<String>,
        size: u64,
        mime_type: impl Into<String>,
        source: Arc<dyn FileSource>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            path: None,
            source,
        }
    }

    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        let data = data.into();
        let size = data.len() as u64;
        Self::new(name, size, mime_type, Arc::new(InMemoryFile::new(data)))
    }

    /// Build a handle from a local path, guessing the MIME type from the
    /// extension the way a browser file input does.
    pub async fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} has no usable file name", path.display()),
                )
            })?;
        let mime_type = content_type_for_name(&name).unwrap_or_default();

        Ok(Self {
            name,
            size: metadata.len(),
            mime_type: mime_type.to_string(),
            path: Some(path.to_path_buf()),
            source: Arc::new(LocalFile::new(path)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// MIME type as reported by the picker (may be empty).
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Lowercased extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name)
    }

    /// MIME type used for transfer and registration.
    ///
    /// The picker-reported type wins; otherwise the extension is looked up,
    /// falling back to `application/octet-stream`.
    pub fn resolved_mime_type(&self) -> String {
        let reported = self.mime_type.trim();
        if !reported.is_empty() {
            return reported.to_lowercase();
        }
        content_type_for_name(&self.name)
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string()
    }

    pub async fn open(&self) -> io::Result<BoxAsyncRead> {
        self.source.open().await
    }

    pub async fn read_all(&self) -> io::Result<Vec<u8>> {
        self.source.read_all().await
    }

    /// Whether both handles refer to the same underlying source.
    pub fn same_source(&self, other: &FileHandle) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.source) as *const (),
            Arc::as_ptr(&other.source) as *const (),
        )
    }
}

impl Debug for FileHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FileHandle")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("mime_type", &self.mime_type)
            .field("path", &self.path)
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileHandleView<'a> {
    name: &'a str,
    size: u64,
    mime_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a Path>,
}

impl Serialize for FileHandle {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FileHandleView {
            name: &self.name,
            size: self.size,
            mime_type: &self.mime_type,
            path: self.path.as_deref(),
        }
        .serialize(serializer)
    }
}

/// Ordered files delivered by one selection or drop event.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct UploadBatch(Vec<FileHandle>);

impl UploadBatch {
    pub fn new(files: Vec<FileHandle>) -> Self {
        Self(files)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileHandle> {
        self.0.iter()
    }
}

impl From<Vec<FileHandle>> for UploadBatch {
    fn from(files: Vec<FileHandle>) -> Self {
        Self(files)
    }
}

impl FromIterator<FileHandle> for UploadBatch {
    fn from_iter<I: IntoIterator<Item = FileHandle>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for UploadBatch {
    type Item = FileHandle;
    type IntoIter = std::vec::IntoIter<FileHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a UploadBatch {
    type Item = &'a FileHandle;
    type IntoIter = std::slice::Iter<'a, FileHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| e.to_lowercase())
}

/// Look up the content type for a file name by extension.
pub fn content_type_for_name(filename: &str) -> Option<&'static str> {
    let extension = extension_of(filename)?;
    let content_type = match extension.as_str() {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        // Videos
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        // Documents
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "zip" => "application/zip",
        "tar" => "application/x-tar",
        "gz" => "application/gzip",
        _ => return None,
    };
    Some(content_type)
}
