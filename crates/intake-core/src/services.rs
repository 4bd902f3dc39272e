//! Collaborator interfaces consumed by the upload pipeline.
//!
//! The pipeline only ever talks to these traits. Concrete implementations live
//! in `intake-storage` (direct storage transfer), `intake-api-client`
//! (presigned transfer and metadata registration) and `intake-cli` (picker and
//! console notifications).

use async_trait::async_trait;

use crate::error::{RegistrationError, TransferError};
use crate::models::{
    FileHandle, RegisterAssetRequest, RegisteredAsset, TransferOptions, TransferResult,
    UploadBatch,
};

/// Moves the bytes of one file to remote storage.
#[async_trait]
pub trait RawTransfer: Send + Sync {
    async fn transfer(
        &self,
        file: &FileHandle,
        options: &TransferOptions,
    ) -> Result<TransferResult, TransferError>;
}

/// Records a transferred file with the backend.
#[async_trait]
pub trait MetadataRegistrar: Send + Sync {
    async fn register(
        &self,
        request: RegisterAssetRequest,
    ) -> Result<RegisteredAsset, RegistrationError>;
}

/// Source of user-selected files.
#[async_trait]
pub trait Picker: Send + Sync {
    async fn open(&self) -> anyhow::Result<UploadBatch>;
}

/// Fire-and-forget user notifications.
pub trait NotificationSink: Send + Sync {
    fn notify_success(&self, message: &str);

    fn notify_error(&self, message: &str);

    /// Defaults to the error channel.
    fn notify_warning(&self, message: &str) {
        self.notify_error(message);
    }
}
