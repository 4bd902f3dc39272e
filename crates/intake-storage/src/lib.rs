//! Intake Storage Library
//!
//! Storage backends used by the direct transfer mode: the [`Storage`] trait,
//! S3 and local filesystem implementations, and [`StorageTransfer`], which
//! adapts a backend to the pipeline's raw transfer step.
//!
//! # Storage key format
//!
//! `{key_prefix}/{identifier}/{uuid}.{ext}`. Absent segments are left out, and
//! a key with neither a prefix nor an identifier starts with `uploads/`. Keys
//! must not contain `..` or a leading `/`. Key generation is centralized in
//! the [`keys`] module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;
pub mod transfer;

// Re-export commonly used types
pub use factory::create_storage;
pub use intake_core::StorageBackend;
pub use keys::generate_storage_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
pub use transfer::StorageTransfer;
