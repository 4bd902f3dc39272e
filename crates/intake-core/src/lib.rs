//! Intake Core Library
//!
//! This crate provides the domain models, error taxonomy, configuration and the
//! narrow collaborator traits shared by every intake component. The upload
//! orchestration itself lives in `intake-uploader`; concrete transfer and
//! registration backends live in `intake-storage` and `intake-api-client`.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;
pub mod storage_types;

// Re-export commonly used types
pub use config::{IntakeConfig, TransferMode};
pub use error::{
    CallbackError, LogLevel, RegistrationError, TransferError, UploadError, UploadResult,
};
pub use models::{
    FileHandle, FileSource, KeyPrefix, OrchestrationPolicy, RegisterAssetRequest,
    RegisteredAsset, TransferOptions, TransferResult, UploadBatch, UploadMode,
};
pub use services::{MetadataRegistrar, NotificationSink, Picker, RawTransfer};
pub use storage_types::StorageBackend;
