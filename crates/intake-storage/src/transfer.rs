//! Direct transfer of selected files into a [`Storage`] backend.

use async_trait::async_trait;
use intake_core::{FileHandle, RawTransfer, TransferError, TransferOptions, TransferResult};
use std::sync::Arc;

use crate::keys::generate_storage_key;
use crate::traits::Storage;

/// [`RawTransfer`] that streams each file straight into a storage backend.
#[derive(Clone)]
pub struct StorageTransfer {
    storage: Arc<dyn Storage>,
}

impl StorageTransfer {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl RawTransfer for StorageTransfer {
    async fn transfer(
        &self,
        file: &FileHandle,
        options: &TransferOptions,
    ) -> Result<TransferResult, TransferError> {
        options.validate()?;

        let key = generate_storage_key(options, file.name());
        let mime_type = file.resolved_mime_type();

        let reader = file.open().await.map_err(|source| TransferError::Read {
            name: file.name().to_string(),
            source,
        })?;

        let stored = self
            .storage
            .upload_stream(&key, &mime_type, Some(file.size()), reader)
            .await
            .map_err(|e| TransferError::Storage(e.to_string()))?;

        tracing::debug!(
            file_name = %file.name(),
            key = %stored.key,
            url = %stored.url,
            backend = %self.storage.backend_type(),
            "File transferred to storage"
        );

        Ok(TransferResult {
            key: stored.key,
            mime_type,
            name: file.name().to_string(),
            size: stored.size_bytes,
        })
    }
}
