//! User-facing notification messages and shared defaults.

/// Warning shown when a batch is rejected by the single-file policy.
pub const TOO_MANY_FILES_MESSAGE: &str = "Files exceeded, please upload only one file.";

/// Shown once per uploaded file, or once per pass-through batch.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "🎉 Successfully uploaded";

/// Generic failure shown for any transfer, registration or callback error.
pub const UPLOAD_FAILURE_MESSAGE: &str = "Uh oh! Something went wrong, please try again.";

/// Label of the trigger affordance while idle.
pub const TRIGGER_LABEL_IDLE: &str = "Select a file";

/// Label of the trigger affordance while a run is in flight.
pub const TRIGGER_LABEL_BUSY: &str = "Uploading...";

/// Key segment used when neither a key prefix nor an identifier is supplied.
pub const DEFAULT_KEY_SEGMENT: &str = "uploads";

/// Fallback content type when nothing better can be resolved.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Default lifetime requested for presigned upload URLs.
pub const DEFAULT_PRESIGNED_EXPIRES_SECS: u64 = 3600;
