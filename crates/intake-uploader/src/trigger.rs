//! The "select a file" affordance.

use std::sync::Arc;

use intake_core::{Picker, UploadBatch};

use crate::status::StatusWatcher;

#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    #[error("An upload is already in progress")]
    Disabled,

    #[error("File picker failed")]
    Picker(#[source] anyhow::Error),
}

/// Opens a picker, but only while the pipeline it watches is idle.
#[derive(Clone)]
pub struct Trigger {
    picker: Arc<dyn Picker>,
    status: StatusWatcher,
}

impl Trigger {
    pub fn new(picker: Arc<dyn Picker>, status: StatusWatcher) -> Self {
        Self { picker, status }
    }

    pub fn enabled(&self) -> bool {
        !self.status.is_busy()
    }

    pub fn label(&self) -> &'static str {
        self.status.current().label()
    }

    pub async fn open(&self) -> Result<UploadBatch, TriggerError> {
        if !self.enabled() {
            return Err(TriggerError::Disabled);
        }
        self.picker.open().await.map_err(TriggerError::Picker)
    }
}
