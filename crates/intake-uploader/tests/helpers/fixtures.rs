use intake_core::{FileHandle, KeyPrefix, OrchestrationPolicy, TransferOptions, UploadBatch};

pub fn png(name: &str) -> FileHandle {
    FileHandle::from_bytes(name, "image/png", name.as_bytes().to_vec())
}

pub fn batch(names: &[&str]) -> UploadBatch {
    names.iter().map(|name| png(name)).collect()
}

pub fn upload_options() -> TransferOptions {
    TransferOptions::new(
        Some("user-1".to_string()),
        Some(KeyPrefix::new("avatars").unwrap()),
    )
}

pub fn upload_policy(allow_multiple: bool) -> OrchestrationPolicy {
    OrchestrationPolicy::upload(upload_options()).with_multiple(allow_multiple)
}

pub fn pass_through_policy(allow_multiple: bool) -> OrchestrationPolicy {
    OrchestrationPolicy::pass_through().with_multiple(allow_multiple)
}
