use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Output of the raw transfer step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResult {
    pub key: String,
    pub mime_type: String,
    pub name: String,
    pub size: u64,
}

/// Body sent to the backend to register a transferred file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAssetRequest {
    pub key: String,
    pub mime_type: String,
    pub name: String,
    pub size: u64,
}

impl From<TransferResult> for RegisterAssetRequest {
    fn from(result: TransferResult) -> Self {
        Self {
            key: result.key,
            mime_type: result.mime_type,
            name: result.name,
            size: result.size,
        }
    }
}

/// The backend's canonical record of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredAsset {
    pub id: Uuid,
    pub name: String,
    pub key: String,
    pub mime_type: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
