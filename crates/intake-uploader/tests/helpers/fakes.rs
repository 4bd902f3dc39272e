use async_trait::async_trait;
use chrono::Utc;
use intake_core::{
    CallbackError, FileHandle, MetadataRegistrar, NotificationSink, Picker, RawTransfer,
    RegisterAssetRequest, RegisteredAsset, RegistrationError, TransferError, TransferOptions,
    TransferResult, UploadBatch,
};
use intake_uploader::{Status, StatusWatcher, SuccessHandler, SuccessPayload};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use uuid::Uuid;

use super::{Event, EventLog};

/// Lets a test hold a transfer mid-flight.
#[derive(Default)]
pub struct Hold {
    pub started: Notify,
    pub release: Notify,
}

pub struct RecordingTransfer {
    log: EventLog,
    fail_on: Option<String>,
    hold: Option<Arc<Hold>>,
}

impl RecordingTransfer {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            fail_on: None,
            hold: None,
        }
    }

    pub fn failing_on(log: EventLog, name: &str) -> Self {
        Self {
            fail_on: Some(name.to_string()),
            ..Self::new(log)
        }
    }

    pub fn held(log: EventLog, hold: Arc<Hold>) -> Self {
        Self {
            hold: Some(hold),
            ..Self::new(log)
        }
    }
}

#[async_trait]
impl RawTransfer for RecordingTransfer {
    async fn transfer(
        &self,
        file: &FileHandle,
        options: &TransferOptions,
    ) -> Result<TransferResult, TransferError> {
        self.log.push(Event::Transfer(file.name().to_string()));

        if let Some(hold) = &self.hold {
            hold.started.notify_one();
            hold.release.notified().await;
        }

        if self.fail_on.as_deref() == Some(file.name()) {
            return Err(TransferError::Rejected {
                name: file.name().to_string(),
                status: 500,
            });
        }

        let prefix = options
            .key_prefix
            .as_ref()
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| "uploads".to_string());
        Ok(TransferResult {
            key: format!("{}/{}", prefix, file.name()),
            mime_type: file.resolved_mime_type(),
            name: file.name().to_string(),
            size: file.size(),
        })
    }
}

pub struct RecordingRegistrar {
    log: EventLog,
    fail_on_key: Option<String>,
}

impl RecordingRegistrar {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            fail_on_key: None,
        }
    }

    pub fn failing_on(log: EventLog, key: &str) -> Self {
        Self {
            log,
            fail_on_key: Some(key.to_string()),
        }
    }
}

#[async_trait]
impl MetadataRegistrar for RecordingRegistrar {
    async fn register(
        &self,
        request: RegisterAssetRequest,
    ) -> Result<RegisteredAsset, RegistrationError> {
        self.log.push(Event::Register(request.key.clone()));

        if self.fail_on_key.as_deref() == Some(request.key.as_str()) {
            return Err(RegistrationError::Rejected {
                status: 409,
                message: "duplicate key".to_string(),
            });
        }

        let now = Utc::now();
        Ok(RegisteredAsset {
            id: Uuid::new_v4(),
            name: request.name,
            key: request.key,
            mime_type: request.mime_type,
            size: request.size,
            created_at: now,
            updated_at: now,
        })
    }
}

pub struct RecordingNotifier {
    log: EventLog,
}

impl RecordingNotifier {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify_success(&self, message: &str) {
        self.log.push(Event::Success(message.to_string()));
    }

    fn notify_error(&self, message: &str) {
        self.log.push(Event::Error(message.to_string()));
    }

    fn notify_warning(&self, message: &str) {
        self.log.push(Event::Warning(message.to_string()));
    }
}

/// Error-only sink relying on the default warning routing.
pub struct ErrorOnlyNotifier {
    log: EventLog,
}

impl ErrorOnlyNotifier {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl NotificationSink for ErrorOnlyNotifier {
    fn notify_success(&self, message: &str) {
        self.log.push(Event::Success(message.to_string()));
    }

    fn notify_error(&self, message: &str) {
        self.log.push(Event::Error(message.to_string()));
    }
}

pub struct RecordingHandler {
    log: EventLog,
    fail_on: Option<String>,
    watcher: Option<StatusWatcher>,
    seen_status: Mutex<Vec<Status>>,
    batches: Mutex<Vec<Vec<FileHandle>>>,
}

impl RecordingHandler {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            fail_on: None,
            watcher: None,
            seen_status: Mutex::new(Vec::new()),
            batches: Mutex::new(Vec::new()),
        }
    }

    /// Fail when called back for `name` (or for any batch, in pass-through).
    pub fn failing_on(mut self, name: &str) -> Self {
        self.fail_on = Some(name.to_string());
        self
    }

    pub fn watching(mut self, watcher: StatusWatcher) -> Self {
        self.watcher = Some(watcher);
        self
    }

    pub fn seen_status(&self) -> Vec<Status> {
        self.seen_status.lock().unwrap().clone()
    }

    pub fn batches(&self) -> Vec<Vec<FileHandle>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl SuccessHandler for RecordingHandler {
    async fn on_success(&self, payload: SuccessPayload<'_>) -> Result<(), CallbackError> {
        if let Some(watcher) = &self.watcher {
            self.seen_status.lock().unwrap().push(watcher.current());
        }

        let failing = match payload {
            SuccessPayload::Asset(asset) => {
                self.log.push(Event::Callback(asset.name.clone()));
                self.fail_on.as_deref() == Some(asset.name.as_str())
            }
            SuccessPayload::Files(files) => {
                self.log.push(Event::CallbackBatch(
                    files.iter().map(|f| f.name().to_string()).collect(),
                ));
                self.batches.lock().unwrap().push(files.to_vec());
                self.fail_on.is_some()
            }
        };

        if failing {
            return Err(CallbackError::msg("handler rejected payload"));
        }
        Ok(())
    }
}

pub struct PanickingHandler;

#[async_trait]
impl SuccessHandler for PanickingHandler {
    async fn on_success(&self, _payload: SuccessPayload<'_>) -> Result<(), CallbackError> {
        panic!("success handler panicked");
    }
}

pub struct StaticPicker {
    batch: UploadBatch,
}

impl StaticPicker {
    pub fn new(batch: UploadBatch) -> Self {
        Self { batch }
    }
}

#[async_trait]
impl Picker for StaticPicker {
    async fn open(&self) -> anyhow::Result<UploadBatch> {
        Ok(self.batch.clone())
    }
}
