use intake_core::{OrchestrationPolicy, Picker, UploadBatch, UploadError};
use std::sync::Arc;

use crate::gate;
use crate::handler::SuccessHandler;
use crate::pipeline::{RunOutcome, UploadPipeline};
use crate::status::{Status, StatusWatcher};
use crate::trigger::{Trigger, TriggerError};

/// Result of handing a batch to the uploader.
#[derive(Debug)]
pub enum DropOutcome {
    /// The gate refused the batch; the pipeline never started.
    Rejected(UploadError),
    /// The gate accepted the batch and the pipeline ran.
    Ran(RunOutcome),
}

impl DropOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DropOutcome::Ran(outcome) if outcome.is_success())
    }
}

/// Hosts the gate and pipeline under one policy, like a drop zone would.
pub struct Uploader {
    pipeline: UploadPipeline,
    policy: OrchestrationPolicy,
}

impl Uploader {
    pub fn new(pipeline: UploadPipeline, policy: OrchestrationPolicy) -> Self {
        Self { pipeline, policy }
    }

    pub fn status(&self) -> Status {
        self.pipeline.status()
    }

    pub fn status_watcher(&self) -> StatusWatcher {
        self.pipeline.status_watcher()
    }

    /// A trigger bound to this uploader's status.
    pub fn trigger(&self, picker: Arc<dyn Picker>) -> Trigger {
        Trigger::new(picker, self.status_watcher())
    }

    /// Handle a dropped or selected batch.
    pub async fn on_drop(
        &mut self,
        batch: UploadBatch,
        on_success: Option<&dyn SuccessHandler>,
    ) -> DropOutcome {
        match gate::accept(batch, &self.policy) {
            Ok(accepted) => {
                DropOutcome::Ran(self.pipeline.run(accepted, &self.policy, on_success).await)
            }
            Err(rejection) => {
                self.pipeline.notifier().notify_warning(rejection.client_message());
                DropOutcome::Rejected(rejection)
            }
        }
    }

    /// Open the trigger's picker and handle whatever it returns.
    pub async fn select(
        &mut self,
        trigger: &Trigger,
        on_success: Option<&dyn SuccessHandler>,
    ) -> Result<DropOutcome, TriggerError> {
        let batch = trigger.open().await?;
        Ok(self.on_drop(batch, on_success).await)
    }
}
