//! Error types module
//!
//! The intake error taxonomy. `TooManyFiles` is raised by the intake gate and
//! never reaches the pipeline. The remaining three kinds are raised inside a
//! pipeline run and are all handled the same way: logged in full, surfaced to
//! the user as one generic message.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like policy violations
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Failure of the raw transfer step.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("Failed to read file {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid transfer options: {0}")]
    InvalidOptions(String),

    #[error("Storage upload failed: {0}")]
    Storage(String),

    #[error("Failed to upload file \"{name}\", failed with status code {status}")]
    Rejected { name: String, status: u16 },

    #[error("Transfer request failed")]
    Request(#[source] anyhow::Error),

    #[error("No transfer service configured")]
    Unconfigured,
}

/// Failure of the metadata registration step.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Registration rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Registration request failed")]
    Request(#[source] anyhow::Error),

    #[error("No registration service configured")]
    Unconfigured,
}

/// Failure raised by the caller-supplied success handler.
#[derive(Debug, thiserror::Error)]
#[error("Success handler failed")]
pub struct CallbackError(#[source] pub anyhow::Error);

impl CallbackError {
    pub fn new(err: impl Into<anyhow::Error>) -> Self {
        Self(err.into())
    }

    pub fn msg(message: impl std::fmt::Display + std::fmt::Debug + Send + Sync + 'static) -> Self {
        Self(anyhow::Error::msg(message))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Too many files: {count} selected but only one is allowed")]
    TooManyFiles { count: usize },

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Callback(#[from] CallbackError),
}

pub type UploadResult<T> = Result<T, UploadError>;

impl UploadError {
    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            UploadError::TooManyFiles { .. } => "TOO_MANY_FILES",
            UploadError::Transfer(_) => "TRANSFER_ERROR",
            UploadError::Registration(_) => "REGISTRATION_ERROR",
            UploadError::Callback(_) => "CALLBACK_ERROR",
        }
    }

    /// Message shown to the end user.
    ///
    /// Post-intake failures are deliberately indistinguishable to the user.
    pub fn client_message(&self) -> &'static str {
        match self {
            UploadError::TooManyFiles { .. } => crate::constants::TOO_MANY_FILES_MESSAGE,
            _ => crate::constants::UPLOAD_FAILURE_MESSAGE,
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            UploadError::TooManyFiles { .. } => LogLevel::Debug,
            _ => LogLevel::Error,
        }
    }

    /// Whether the error happened after the gate accepted the batch.
    pub fn is_post_intake(&self) -> bool {
        !matches!(self, UploadError::TooManyFiles { .. })
    }
}
