//! Caller-supplied success callbacks.

use async_trait::async_trait;
use intake_core::{CallbackError, FileHandle, RegisteredAsset};

/// What a successful step hands to the caller.
///
/// Upload mode yields one `Asset` per registered file. Pass-through mode
/// yields the whole original batch once as `Files`.
#[derive(Debug, Clone, Copy)]
pub enum SuccessPayload<'a> {
    Asset(&'a RegisteredAsset),
    Files(&'a [FileHandle]),
}

#[async_trait]
pub trait SuccessHandler: Send + Sync {
    async fn on_success(&self, payload: SuccessPayload<'_>) -> Result<(), CallbackError>;
}

/// Plain closures work as handlers.
#[async_trait]
impl<F> SuccessHandler for F
where
    F: Fn(SuccessPayload<'_>) -> Result<(), CallbackError> + Send + Sync,
{
    async fn on_success(&self, payload: SuccessPayload<'_>) -> Result<(), CallbackError> {
        self(payload)
    }
}
