//! Shared key generation for storage backends.

use intake_core::constants::DEFAULT_KEY_SEGMENT;
use intake_core::models::extension_of;
use intake_core::TransferOptions;
use uuid::Uuid;

const FALLBACK_EXTENSION: &str = "bin";

/// Generate a fresh storage key for a file.
///
/// Produces `{key_prefix}/{identifier}/{uuid}.{ext}`. Missing segments are
/// skipped and `uploads/` is used when both are missing. Options are expected
/// to have passed [`TransferOptions::validate`].
pub fn generate_storage_key(options: &TransferOptions, file_name: &str) -> String {
    let mut segments: Vec<&str> = Vec::with_capacity(3);
    if let Some(prefix) = &options.key_prefix {
        segments.push(prefix.as_str());
    }
    if let Some(identifier) = &options.identifier {
        segments.push(identifier.as_str());
    }
    if segments.is_empty() {
        segments.push(DEFAULT_KEY_SEGMENT);
    }

    let extension = extension_of(file_name)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());

    format!("{}/{}.{}", segments.join("/"), Uuid::new_v4(), extension)
}
