use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use std::pin::Pin;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/intake/files")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:3000/files")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert storage key to filesystem path
    ///
    /// Rejects keys that could escape the base storage directory.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty() || storage_key.contains("..") || storage_key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        let relative = Path::new(storage_key);
        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            return Err(StorageError::InvalidKey(
                "Storage key resolves outside storage directory".to_string(),
            ));
        }

        let path = self.base_path.join(relative);

        // Existing entries may be symlinks pointing elsewhere
        if let Ok(canonical) = path.canonicalize() {
            let base_canonical = self.base_path.canonicalize().map_err(|e| {
                StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
            })?;
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    /// Generate public URL for file
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(
        &self,
        storage_key: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredObject> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len() as u64;

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(StoredObject {
            key: storage_key.to_string(),
            url: self.generate_url(storage_key),
            size_bytes: size,
        })
    }

    async fn upload_stream(
        &self,
        storage_key: &str,
        _content_type: &str,
        content_length: Option<u64>,
        mut reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<StoredObject> {
        let path = self.key_to_path(storage_key)?;
        let start = std::time::Instant::now();

        self.ensure_parent_dir(&path).await?;

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let bytes_copied = tokio::io::copy(&mut reader, &mut file).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to write stream to file {}: {}",
                path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        if let Some(expected) = content_length {
            if expected != bytes_copied {
                tracing::warn!(
                    key = %storage_key,
                    expected_bytes = expected,
                    size_bytes = bytes_copied,
                    "Stream length differs from declared content length"
                );
            }
        }

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = bytes_copied,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage stream upload successful"
        );

        Ok(StoredObject {
            key: storage_key.to_string(),
            url: self.generate_url(storage_key),
            size_bytes: bytes_copied,
        })
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(storage_key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(storage_key.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(data)
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn storage_in(dir: &Path) -> LocalStorage {
        LocalStorage::new(dir, "http://localhost:3000/files/".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_local_storage_upload_download() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let data = b"test data".to_vec();
        let stored = storage
            .upload("docs/user-1/test.txt", "text/plain", data.clone())
            .await
            .unwrap();

        assert_eq!(stored.key, "docs/user-1/test.txt");
        assert_eq!(stored.url, "http://localhost:3000/files/docs/user-1/test.txt");
        assert_eq!(stored.size_bytes, 9);
        assert!(dir.path().join("docs/user-1/test.txt").is_file());

        let downloaded = storage.download(&stored.key).await.unwrap();
        assert_eq!(data, downloaded);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let result = storage.download("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.upload("../escape.txt", "text/plain", vec![1]).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("./relative").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_local_storage_exists() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        storage
            .upload("uploads/exists.txt", "text/plain", b"test".to_vec())
            .await
            .unwrap();

        assert!(storage.exists("uploads/exists.txt").await.unwrap());
        assert!(!storage.exists("uploads/nonexistent.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_download_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let result = storage.download("uploads/missing.bin").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_local_storage_stream_upload() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let data = b"stream test data".to_vec();
        let cursor = std::io::Cursor::new(data.clone());
        let reader = Box::pin(cursor) as Pin<Box<dyn AsyncRead + Send + Unpin>>;

        let stored = storage
            .upload_stream(
                "uploads/stream.txt",
                "text/plain",
                Some(data.len() as u64),
                reader,
            )
            .await
            .unwrap();

        assert_eq!(stored.size_bytes, data.len() as u64);
        let downloaded = storage.download(&stored.key).await.unwrap();
        assert_eq!(data, downloaded);
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }
}
