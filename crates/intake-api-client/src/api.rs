//! Domain methods for the intake API client.

use crate::{ApiClient, ApiStatusError};
use anyhow::{Context, Result};
use intake_core::{KeyPrefix, RegisterAssetRequest, RegisteredAsset};
use serde::{Deserialize, Serialize};

/// Body of `POST {api}/uploads/presigned`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUploadRequest {
    pub file_name: String,
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_prefix: Option<KeyPrefix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// URL lifetime in seconds
    pub expires_in: u64,
}

/// A presigned PUT target issued by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignedUpload {
    pub url: String,
    pub key: String,
}

impl ApiClient {
    /// Register a transferred file.
    pub async fn register_asset(&self, request: &RegisterAssetRequest) -> Result<RegisteredAsset> {
        self.post_json(&format!("{}/buckets", self.prefix()), request)
            .await
    }

    /// Ask the API for a presigned upload URL and the key it will store under.
    pub async fn request_presigned_upload(
        &self,
        request: &PresignedUploadRequest,
    ) -> Result<PresignedUpload> {
        self.post_json(&format!("{}/uploads/presigned", self.prefix()), request)
            .await
    }

    /// PUT raw bytes to a presigned URL.
    ///
    /// No API credentials are attached; the URL carries its own signature.
    pub async fn put_presigned(&self, url: &str, content_type: &str, data: Vec<u8>) -> Result<()> {
        let response = self
            .client()
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .context("Failed to send presigned upload")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiStatusError {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(())
    }
}
