//! Intake Uploader
//!
//! The upload orchestration state machine. The [`gate`] checks an incoming
//! batch against the single/multiple file policy, the [`pipeline`] drives each
//! accepted file through transfer and registration one at a time, and
//! [`Uploader`] hosts both the way a drop zone would. Status is published
//! read-only through [`StatusWatcher`], which also drives the [`Trigger`]
//! affordance.

pub mod gate;
pub mod handler;
pub mod pipeline;
pub mod status;
pub mod trigger;
pub mod uploader;

pub use gate::accept;
pub use handler::{SuccessHandler, SuccessPayload};
pub use pipeline::{RunOutcome, UploadPipeline};
pub use status::{Status, StatusWatcher};
pub use trigger::{Trigger, TriggerError};
pub use uploader::{DropOutcome, Uploader};
