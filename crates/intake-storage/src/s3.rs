use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStoreExt, PutPayload, Result as ObjectResult};
use std::pin::Pin;
use tokio::io::{AsyncRead, AsyncReadExt};

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        // Credentials come from the standard AWS environment variables.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
        })
    }

    /// Public URL for an S3 object
    ///
    /// Path-style `{endpoint}/{bucket}/{key}` for custom endpoints, otherwise
    /// the virtual-hosted AWS form.
    fn generate_url(&self, key: &str) -> String {
        match self.endpoint_url {
            Some(ref endpoint) => {
                format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key)
            }
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }

    fn location(storage_key: &str) -> StorageResult<Path> {
        if storage_key.is_empty() || storage_key.contains("..") || storage_key.starts_with('/') {
            return Err(StorageError::InvalidKey(storage_key.to_string()));
        }
        Path::parse(storage_key).map_err(|e| StorageError::InvalidKey(e.to_string()))
    }

    async fn put_bytes(&self, storage_key: &str, bytes: Bytes) -> StorageResult<StoredObject> {
        let location = Self::location(storage_key)?;
        let size = bytes.len() as u64;
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self.store.put(&location, PutPayload::from(bytes)).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(StoredObject {
            key: storage_key.to_string(),
            url: self.generate_url(storage_key),
            size_bytes: size,
        })
    }
}

/// Upper bound on the buffer preallocated from a declared content length.
const MAX_PREALLOCATED_BYTES: u64 = 8 * 1024 * 1024;

/// Read a whole stream into memory.
///
/// The declared length only sizes the initial buffer, capped at
/// [`MAX_PREALLOCATED_BYTES`].
async fn read_stream(
    storage_key: &str,
    content_length: Option<u64>,
    reader: &mut Pin<Box<dyn AsyncRead + Send + Unpin>>,
) -> StorageResult<Vec<u8>> {
    let capacity = content_length
        .map(|len| len.min(MAX_PREALLOCATED_BYTES))
        .and_then(|len| usize::try_from(len).ok())
        .unwrap_or_default();
    let mut buffer = Vec::with_capacity(capacity);
    reader
        .read_to_end(&mut buffer)
        .await
        .map_err(|e| StorageError::UploadFailed(format!("Failed to read from stream: {}", e)))?;

    if let Some(expected) = content_length {
        if expected != buffer.len() as u64 {
            tracing::warn!(
                key = %storage_key,
                expected_bytes = expected,
                size_bytes = buffer.len(),
                "Stream length differs from declared content length"
            );
        }
    }

    Ok(buffer)
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload(
        &self,
        storage_key: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredObject> {
        self.put_bytes(storage_key, Bytes::from(data)).await
    }

    async fn upload_stream(
        &self,
        storage_key: &str,
        _content_type: &str,
        content_length: Option<u64>,
        mut reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<StoredObject> {
        // Buffered into a single put; multipart upload is not used.
        Self::location(storage_key)?;
        let buffer = read_stream(storage_key, content_length, &mut reader).await?;

        self.put_bytes(storage_key, Bytes::from(buffer)).await
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let start = std::time::Instant::now();
        let location = Self::location(storage_key)?;

        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(storage_key.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 download failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        tracing::debug!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = bytes.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(bytes.to_vec())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let location = Self::location(storage_key)?;
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
