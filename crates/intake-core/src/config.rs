//! Configuration module
//!
//! Environment-driven configuration for the transfer backends and the
//! registration API. Binaries load `.env` first and then call
//! [`IntakeConfig::from_env`] followed by [`IntakeConfig::validate`].

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::constants::DEFAULT_PRESIGNED_EXPIRES_SECS;
use crate::storage_types::StorageBackend;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_API_VERSION: &str = "v0";

/// How file bytes reach storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferMode {
    /// Upload straight to the configured storage backend.
    #[default]
    Direct,
    /// Ask the API for a presigned URL and PUT the bytes to it.
    Presigned,
}

impl FromStr for TransferMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(TransferMode::Direct),
            "presigned" => Ok(TransferMode::Presigned),
            _ => Err(anyhow::anyhow!("Invalid transfer mode: {}", s)),
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMode::Direct => write!(f, "direct"),
            TransferMode::Presigned => write!(f, "presigned"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct IntakeConfig {
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Transfer configuration
    pub transfer_mode: TransferMode,
    pub presigned_expires_secs: u64,
    // Registration API
    pub api_url: String,
    pub api_key: Option<String>,
    pub api_version: String,
}

impl IntakeConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|s| !s.trim().is_empty());

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(value) => value.parse::<StorageBackend>()?,
            None => StorageBackend::Local,
        };

        let transfer_mode = match var("TRANSFER_MODE") {
            Some(value) => value.parse::<TransferMode>()?,
            None => TransferMode::Direct,
        };

        let presigned_expires_secs = match var("PRESIGNED_URL_EXPIRES_SECS") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| {
                anyhow::anyhow!("PRESIGNED_URL_EXPIRES_SECS must be a valid number")
            })?,
            None => DEFAULT_PRESIGNED_EXPIRES_SECS,
        };

        Ok(Self {
            storage_backend,
            s3_bucket: var("S3_BUCKET"),
            s3_region: var("S3_REGION"),
            s3_endpoint: var("S3_ENDPOINT"),
            aws_region: var("AWS_REGION"),
            local_storage_path: var("LOCAL_STORAGE_PATH"),
            local_storage_base_url: var("LOCAL_STORAGE_BASE_URL"),
            transfer_mode,
            presigned_expires_secs,
            api_url: var("INTAKE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_key: var("INTAKE_API_KEY"),
            api_version: var("INTAKE_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        })
    }

    /// Region used for S3, preferring `S3_REGION` over `AWS_REGION`.
    pub fn s3_region(&self) -> Option<&str> {
        self.s3_region.as_deref().or(self.aws_region.as_deref())
    }

    /// Validate the settings needed to upload and register files.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.api_key.is_none() {
            return Err(anyhow::anyhow!(
                "INTAKE_API_KEY must be set to register uploaded files"
            ));
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "INTAKE_API_URL must be an http:// or https:// URL"
            ));
        }

        match self.transfer_mode {
            TransferMode::Presigned => {
                if self.presigned_expires_secs == 0 {
                    return Err(anyhow::anyhow!(
                        "PRESIGNED_URL_EXPIRES_SECS must be greater than zero"
                    ));
                }
            }
            TransferMode::Direct => match self.storage_backend {
                StorageBackend::S3 => {
                    if self.s3_bucket.is_none() {
                        return Err(anyhow::anyhow!(
                            "S3_BUCKET must be set when using S3 storage backend"
                        ));
                    }
                    if self.s3_region().is_none() {
                        return Err(anyhow::anyhow!(
                            "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                        ));
                    }
                }
                StorageBackend::Local => {
                    if self.local_storage_path.is_none() {
                        return Err(anyhow::anyhow!(
                            "LOCAL_STORAGE_PATH must be set when using local storage backend"
                        ));
                    }
                    if self.local_storage_base_url.is_none() {
                        return Err(anyhow::anyhow!(
                            "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                        ));
                    }
                }
            },
        }

        Ok(())
    }
}
