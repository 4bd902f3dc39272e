//! Upload pipeline: transfer → register → callback, one file at a time.
//!
//! A run marks the pipeline Busy for its whole duration and Idle again on
//! every exit path. Files are processed strictly in input order; the first
//! failure aborts the rest of the batch without undoing earlier uploads.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

use intake_core::constants::UPLOAD_SUCCESS_MESSAGE;
use intake_core::{
    LogLevel, MetadataRegistrar, NotificationSink, OrchestrationPolicy, RawTransfer,
    RegisterAssetRequest, RegistrationError, TransferError, TransferOptions, UploadBatch,
    UploadError, UploadMode,
};

use crate::handler::{SuccessHandler, SuccessPayload};
use crate::status::{BusyGuard, Status, StatusWatcher};

/// Report of a finished run.
///
/// User-facing signalling has already happened through notifications and the
/// success handler by the time this is returned.
#[derive(Debug)]
pub enum RunOutcome {
    /// Every file went through. `files` counts the files handled.
    Completed { files: usize },
    /// The run aborted. `completed` files finished before `error`.
    Failed { completed: usize, error: UploadError },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }

    pub fn error(&self) -> Option<&UploadError> {
        match self {
            RunOutcome::Completed { .. } => None,
            RunOutcome::Failed { error, .. } => Some(error),
        }
    }
}

pub struct UploadPipeline {
    transfer: Option<Arc<dyn RawTransfer>>,
    registrar: Option<Arc<dyn MetadataRegistrar>>,
    notifier: Arc<dyn NotificationSink>,
    status: watch::Sender<Status>,
}

impl UploadPipeline {
    pub fn new(
        transfer: Arc<dyn RawTransfer>,
        registrar: Arc<dyn MetadataRegistrar>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self::with_services(Some(transfer), Some(registrar), notifier)
    }

    /// Pipeline without transfer or registration services.
    ///
    /// Pass-through runs work normally; upload runs fail as unconfigured.
    pub fn pass_through_only(notifier: Arc<dyn NotificationSink>) -> Self {
        Self::with_services(None, None, notifier)
    }

    pub fn with_services(
        transfer: Option<Arc<dyn RawTransfer>>,
        registrar: Option<Arc<dyn MetadataRegistrar>>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        let (status, _) = watch::channel(Status::Idle);
        Self {
            transfer,
            registrar,
            notifier,
            status,
        }
    }

    pub fn status(&self) -> Status {
        *self.status.borrow()
    }

    pub fn status_watcher(&self) -> StatusWatcher {
        StatusWatcher::new(self.status.subscribe())
    }

    pub fn notifier(&self) -> &Arc<dyn NotificationSink> {
        &self.notifier
    }

    /// Process an accepted batch.
    ///
    /// The exclusive borrow rules out a second run on the same pipeline while
    /// this one is in flight.
    pub async fn run(
        &mut self,
        batch: UploadBatch,
        policy: &OrchestrationPolicy,
        on_success: Option<&dyn SuccessHandler>,
    ) -> RunOutcome {
        let _busy = BusyGuard::enter(&self.status);
        let start = Instant::now();

        tracing::info!(
            file_count = batch.len(),
            upload = policy.should_upload(),
            "Upload run started"
        );

        let result = match &policy.mode {
            UploadMode::Upload(options) => self.upload_all(&batch, options, on_success).await,
            UploadMode::PassThrough => self.pass_through(&batch, on_success).await,
        };

        match result {
            Ok(files) => {
                tracing::info!(
                    files,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Upload run finished"
                );
                RunOutcome::Completed { files }
            }
            Err((completed, error)) => {
                self.report_failure(&error, completed, batch.len(), start);
                RunOutcome::Failed { completed, error }
            }
        }
    }

    async fn upload_all(
        &self,
        batch: &UploadBatch,
        options: &TransferOptions,
        on_success: Option<&dyn SuccessHandler>,
    ) -> Result<usize, (usize, UploadError)> {
        if batch.is_empty() {
            return Ok(0);
        }

        let transfer = self
            .transfer
            .as_deref()
            .ok_or_else(|| (0, UploadError::from(TransferError::Unconfigured)))?;
        let registrar = self
            .registrar
            .as_deref()
            .ok_or_else(|| (0, UploadError::from(RegistrationError::Unconfigured)))?;

        for (index, file) in batch.iter().enumerate() {
            let file_start = Instant::now();
            tracing::debug!(
                file_index = index,
                file_name = %file.name(),
                size_bytes = file.size(),
                "Uploading file"
            );

            let transferred = transfer
                .transfer(file, options)
                .await
                .map_err(|e| (index, UploadError::from(e)))?;

            let key = transferred.key.clone();
            let asset = registrar
                .register(RegisterAssetRequest::from(transferred))
                .await
                .map_err(|e| (index, UploadError::from(e)))?;

            if let Some(handler) = on_success {
                handler
                    .on_success(SuccessPayload::Asset(&asset))
                    .await
                    .map_err(|e| (index, UploadError::from(e)))?;
            }

            self.notifier.notify_success(UPLOAD_SUCCESS_MESSAGE);

            tracing::info!(
                file_index = index,
                file_name = %file.name(),
                key = %key,
                asset_id = %asset.id,
                duration_ms = file_start.elapsed().as_secs_f64() * 1000.0,
                "File uploaded"
            );
        }

        Ok(batch.len())
    }

    async fn pass_through(
        &self,
        batch: &UploadBatch,
        on_success: Option<&dyn SuccessHandler>,
    ) -> Result<usize, (usize, UploadError)> {
        if let Some(handler) = on_success {
            handler
                .on_success(SuccessPayload::Files(batch.files()))
                .await
                .map_err(|e| (0, UploadError::from(e)))?;
        }

        self.notifier.notify_success(UPLOAD_SUCCESS_MESSAGE);
        Ok(batch.len())
    }

    fn report_failure(&self, error: &UploadError, completed: usize, total: usize, start: Instant) {
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        match error.log_level() {
            LogLevel::Error => tracing::error!(
                error = ?error,
                error_code = error.error_code(),
                completed,
                total,
                duration_ms,
                "Upload run failed: {}",
                error
            ),
            LogLevel::Warn => tracing::warn!(
                error = ?error,
                error_code = error.error_code(),
                completed,
                total,
                duration_ms,
                "Upload run failed: {}",
                error
            ),
            LogLevel::Debug => tracing::debug!(
                error_code = error.error_code(),
                completed,
                total,
                "Upload run failed: {}",
                error
            ),
        }

        self.notifier.notify_error(error.client_message());
    }
}
