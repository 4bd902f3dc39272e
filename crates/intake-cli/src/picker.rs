//! Local file picker with drop-zone style filtering.
//!
//! Files that do not pass the `accept` and size filters are logged and dropped
//! before the batch reaches the intake gate. Paths that cannot be read at all
//! fail the whole pick.

use anyhow::Context;
use async_trait::async_trait;
use intake_core::{FileHandle, Picker, UploadBatch};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// One entry of an `accept` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptPattern {
    /// `.pdf`
    Extension(String),
    /// `image/*`
    MimeWildcard(String),
    /// `image/png`
    Mime(String),
}

impl AcceptPattern {
    pub fn matches(&self, file: &FileHandle) -> bool {
        match self {
            AcceptPattern::Extension(ext) => file.extension().as_deref() == Some(ext.as_str()),
            AcceptPattern::MimeWildcard(major) => file
                .resolved_mime_type()
                .split_once('/')
                .is_some_and(|(file_major, _)| file_major == major),
            AcceptPattern::Mime(mime) => file.resolved_mime_type() == *mime,
        }
    }
}

impl FromStr for AcceptPattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pattern = s.trim().to_lowercase();
        if let Some(ext) = pattern.strip_prefix('.') {
            if ext.is_empty() {
                return Err(anyhow::anyhow!("Invalid accept pattern: {}", s));
            }
            return Ok(AcceptPattern::Extension(ext.to_string()));
        }
        match pattern.split_once('/') {
            Some((major, "*")) if !major.is_empty() => {
                Ok(AcceptPattern::MimeWildcard(major.to_string()))
            }
            Some((major, minor)) if !major.is_empty() && !minor.is_empty() => {
                Ok(AcceptPattern::Mime(pattern))
            }
            _ => Err(anyhow::anyhow!("Invalid accept pattern: {}", s)),
        }
    }
}

/// Why a picked file was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    InvalidType,
    TooLarge { max: u64 },
    TooSmall { min: u64 },
}

impl RejectionReason {
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::InvalidType => "file-invalid-type",
            RejectionReason::TooLarge { .. } => "file-too-large",
            RejectionReason::TooSmall { .. } => "file-too-small",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::InvalidType => write!(f, "File type is not accepted"),
            RejectionReason::TooLarge { max } => write!(f, "File is larger than {} bytes", max),
            RejectionReason::TooSmall { min } => write!(f, "File is smaller than {} bytes", min),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PickerOptions {
    /// Empty accepts everything.
    pub accept: Vec<AcceptPattern>,
    pub max_size: Option<u64>,
    pub min_size: Option<u64>,
}

impl PickerOptions {
    pub fn check(&self, file: &FileHandle) -> Result<(), RejectionReason> {
        if !self.accept.is_empty() && !self.accept.iter().any(|p| p.matches(file)) {
            return Err(RejectionReason::InvalidType);
        }
        if let Some(max) = self.max_size {
            if file.size() > max {
                return Err(RejectionReason::TooLarge { max });
            }
        }
        if let Some(min) = self.min_size {
            if file.size() < min {
                return Err(RejectionReason::TooSmall { min });
            }
        }
        Ok(())
    }
}

/// Picker over a fixed list of local paths.
#[derive(Debug, Clone)]
pub struct LocalPicker {
    paths: Vec<PathBuf>,
    options: PickerOptions,
}

impl LocalPicker {
    pub fn new(paths: Vec<PathBuf>, options: PickerOptions) -> Self {
        Self { paths, options }
    }
}

#[async_trait]
impl Picker for LocalPicker {
    async fn open(&self) -> anyhow::Result<UploadBatch> {
        let mut accepted = Vec::with_capacity(self.paths.len());

        for path in &self.paths {
            let file = FileHandle::from_path(path)
                .await
                .with_context(|| format!("Failed to open file: {}", path.display()))?;

            match self.options.check(&file) {
                Ok(()) => accepted.push(file),
                Err(reason) => {
                    tracing::warn!(
                        file_name = %file.name(),
                        size_bytes = file.size(),
                        mime_type = %file.resolved_mime_type(),
                        code = reason.code(),
                        "Rejected file: {}",
                        reason
                    );
                }
            }
        }

        Ok(UploadBatch::new(accepted))
    }
}
