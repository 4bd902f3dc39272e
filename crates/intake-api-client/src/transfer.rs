//! Two-step transfer through a presigned URL issued by the API.

use async_trait::async_trait;
use intake_core::constants::DEFAULT_PRESIGNED_EXPIRES_SECS;
use intake_core::{
    FileHandle, IntakeConfig, RawTransfer, TransferError, TransferOptions, TransferResult,
};
use std::time::Duration;

use crate::api::PresignedUploadRequest;
use crate::{ApiClient, ApiStatusError};

/// [`RawTransfer`] that asks the API for a presigned URL, then PUTs the bytes.
#[derive(Clone, Debug)]
pub struct PresignedTransfer {
    client: ApiClient,
    expires_in: Duration,
}

impl PresignedTransfer {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            expires_in: Duration::from_secs(DEFAULT_PRESIGNED_EXPIRES_SECS),
        }
    }

    pub fn from_config(client: ApiClient, config: &IntakeConfig) -> Self {
        Self::new(client).with_expires_in(Duration::from_secs(config.presigned_expires_secs))
    }

    pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = expires_in;
        self
    }
}

#[async_trait]
impl RawTransfer for PresignedTransfer {
    async fn transfer(
        &self,
        file: &FileHandle,
        options: &TransferOptions,
    ) -> Result<TransferResult, TransferError> {
        options.validate()?;

        let mime_type = file.resolved_mime_type();
        let presigned = self
            .client
            .request_presigned_upload(&PresignedUploadRequest {
                file_name: file.name().to_string(),
                content_type: mime_type.clone(),
                key_prefix: options.key_prefix.clone(),
                identifier: options.identifier.clone(),
                expires_in: self.expires_in.as_secs(),
            })
            .await
            .map_err(TransferError::Request)?;

        let data = file.read_all().await.map_err(|source| TransferError::Read {
            name: file.name().to_string(),
            source,
        })?;
        let size = data.len() as u64;
        let start = std::time::Instant::now();

        self.client
            .put_presigned(&presigned.url, &mime_type, data)
            .await
            .map_err(|err| match err.downcast::<ApiStatusError>() {
                Ok(status) => TransferError::Rejected {
                    name: file.name().to_string(),
                    status: status.status,
                },
                Err(other) => TransferError::Request(other),
            })?;

        tracing::info!(
            file_name = %file.name(),
            key = %presigned.key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Presigned upload successful"
        );

        Ok(TransferResult {
            key: presigned.key,
            mime_type,
            name: file.name().to_string(),
            size,
        })
    }
}
