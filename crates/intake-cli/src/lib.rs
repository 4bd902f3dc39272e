//! Shared pieces of the `intake` binary: tracing setup, console output and
//! service wiring.

pub mod picker;

use anyhow::Context;
use async_trait::async_trait;
use intake_api_client::{ApiClient, PresignedTransfer};
use intake_core::{
    CallbackError, IntakeConfig, MetadataRegistrar, NotificationSink, RawTransfer, TransferMode,
};
use intake_storage::{create_storage, StorageTransfer};
use intake_uploader::{SuccessHandler, SuccessPayload, UploadPipeline};
use std::sync::Arc;

pub use picker::{AcceptPattern, LocalPicker, PickerOptions, RejectionReason};

/// Initialize tracing for CLI binaries.
///
/// Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Prints user notifications to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify_success(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn notify_error(&self, message: &str) {
        eprintln!("error: {}", message);
    }

    fn notify_warning(&self, message: &str) {
        eprintln!("warning: {}", message);
    }
}

/// Serialize a success payload the way the CLI prints it.
pub fn payload_json(payload: &SuccessPayload<'_>) -> serde_json::Result<String> {
    match payload {
        SuccessPayload::Asset(asset) => serde_json::to_string_pretty(asset),
        SuccessPayload::Files(files) => serde_json::to_string_pretty(files),
    }
}

/// Success handler printing each payload as pretty JSON on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPrinter;

#[async_trait]
impl SuccessHandler for JsonPrinter {
    async fn on_success(&self, payload: SuccessPayload<'_>) -> Result<(), CallbackError> {
        let out = payload_json(&payload).map_err(CallbackError::new)?;
        println!("{}", out);
        Ok(())
    }
}

/// Build an upload pipeline from configuration.
///
/// Pass-through runs need no storage or API access, so the configuration is
/// only read and validated when files are actually uploaded.
pub async fn build_pipeline(
    pass_through: bool,
    notifier: Arc<dyn NotificationSink>,
) -> anyhow::Result<UploadPipeline> {
    if pass_through {
        return Ok(UploadPipeline::pass_through_only(notifier));
    }

    let config = IntakeConfig::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let client = ApiClient::from_config(&config).context("Failed to create API client")?;

    let transfer: Arc<dyn RawTransfer> = match config.transfer_mode {
        TransferMode::Direct => {
            let storage = create_storage(&config)
                .await
                .context("Failed to create storage backend")?;
            tracing::debug!(backend = %storage.backend_type(), "Using direct storage transfer");
            Arc::new(StorageTransfer::new(storage))
        }
        TransferMode::Presigned => {
            tracing::debug!(api_url = %client.base_url(), "Using presigned transfer");
            Arc::new(PresignedTransfer::from_config(client.clone(), &config))
        }
    };
    let registrar: Arc<dyn MetadataRegistrar> = Arc::new(client);

    Ok(UploadPipeline::new(transfer, registrar, notifier))
}
