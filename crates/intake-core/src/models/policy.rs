use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TransferError;

const KEY_PREFIX_MAX_LEN: usize = 64;

/// Validated leading segment of a storage key.
///
/// Lowercase ASCII letters, digits, `-` and `_`, between 1 and 64 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyPrefix(String);

impl KeyPrefix {
    pub fn new(value: impl Into<String>) -> Result<Self, TransferError> {
        let value = value.into();
        if value.is_empty() || value.len() > KEY_PREFIX_MAX_LEN {
            return Err(TransferError::InvalidOptions(format!(
                "key prefix must be between 1 and {} characters",
                KEY_PREFIX_MAX_LEN
            )));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(TransferError::InvalidOptions(format!(
                "key prefix '{}' may only contain lowercase letters, digits, '-' and '_'",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for KeyPrefix {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for KeyPrefix {
    type Error = TransferError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<KeyPrefix> for String {
    fn from(prefix: KeyPrefix) -> Self {
        prefix.0
    }
}

/// Routing options forwarded to the raw transfer step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_prefix: Option<KeyPrefix>,
}

impl TransferOptions {
    pub fn new(identifier: Option<String>, key_prefix: Option<KeyPrefix>) -> Self {
        Self {
            identifier,
            key_prefix,
        }
    }

    /// Check the identifier is usable as a single key segment.
    pub fn validate(&self) -> Result<(), TransferError> {
        if let Some(identifier) = &self.identifier {
            if identifier.is_empty() {
                return Err(TransferError::InvalidOptions(
                    "identifier must not be empty".to_string(),
                ));
            }
            if identifier.contains('/') || identifier.contains("..") {
                return Err(TransferError::InvalidOptions(format!(
                    "identifier '{}' must not contain '/' or '..'",
                    identifier
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadMode {
    /// Transfer and register every file.
    Upload(TransferOptions),
    /// Hand the batch straight to the success handler.
    PassThrough,
}

impl Default for UploadMode {
    fn default() -> Self {
        UploadMode::Upload(TransferOptions::default())
    }
}

/// Per-host configuration of the intake gate and pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrchestrationPolicy {
    pub allow_multiple: bool,
    pub mode: UploadMode,
}

impl OrchestrationPolicy {
    pub fn upload(options: TransferOptions) -> Self {
        Self {
            allow_multiple: false,
            mode: UploadMode::Upload(options),
        }
    }

    pub fn pass_through() -> Self {
        Self {
            allow_multiple: false,
            mode: UploadMode::PassThrough,
        }
    }

    pub fn with_multiple(mut self, allow_multiple: bool) -> Self {
        self.allow_multiple = allow_multiple;
        self
    }

    pub fn should_upload(&self) -> bool {
        matches!(self.mode, UploadMode::Upload(_))
    }

    pub fn transfer_options(&self) -> Option<&TransferOptions> {
        match &self.mode {
            UploadMode::Upload(options) => Some(options),
            UploadMode::PassThrough => None,
        }
    }
}
