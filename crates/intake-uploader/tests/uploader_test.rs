//! Uploader host tests: intake gate, warnings and the trigger affordance.
//!
//! Run with: `cargo test -p intake-uploader --test uploader_test`

mod helpers;

use helpers::fakes::{ErrorOnlyNotifier, Hold, RecordingTransfer, StaticPicker};
use helpers::fixtures::{batch, pass_through_policy, upload_policy};
use helpers::{Event, EventLog, Harness};
use intake_core::constants::{
    TOO_MANY_FILES_MESSAGE, TRIGGER_LABEL_BUSY, TRIGGER_LABEL_IDLE, UPLOAD_SUCCESS_MESSAGE,
};
use intake_core::UploadError;
use intake_uploader::{DropOutcome, RunOutcome, Status, TriggerError, UploadPipeline, Uploader};
use std::sync::Arc;

#[tokio::test]
async fn single_file_policy_rejects_multi_file_drop() {
    let harness = Harness::new();
    let mut uploader = Uploader::new(harness.pipeline(), upload_policy(false));
    let watcher = uploader.status_watcher();
    let handler = harness.handler();

    let outcome = uploader
        .on_drop(batch(&["A.png", "B.png"]), Some(&handler))
        .await;

    assert!(matches!(
        outcome,
        DropOutcome::Rejected(UploadError::TooManyFiles { count: 2 })
    ));
    assert_eq!(
        harness.log.events(),
        vec![Event::Warning(TOO_MANY_FILES_MESSAGE.to_string())]
    );
    assert!(!watcher.has_changed());
    assert_eq!(uploader.status(), Status::Idle);
}

#[tokio::test]
async fn multi_file_policy_uploads_every_file() {
    let harness = Harness::new();
    let mut uploader = Uploader::new(harness.pipeline(), upload_policy(true));
    let handler = harness.handler();

    let outcome = uploader
        .on_drop(batch(&["A.png", "B.png"]), Some(&handler))
        .await;

    assert!(outcome.is_success());
    assert!(matches!(
        outcome,
        DropOutcome::Ran(RunOutcome::Completed { files: 2 })
    ));
    assert_eq!(harness.log.callbacks(), vec!["A.png", "B.png"]);
    assert_eq!(
        harness.log.count(|e| *e == Event::Success(UPLOAD_SUCCESS_MESSAGE.to_string())),
        2
    );
}

#[tokio::test]
async fn warning_falls_back_to_error_channel() {
    let log = EventLog::default();
    let pipeline = UploadPipeline::pass_through_only(Arc::new(ErrorOnlyNotifier::new(log.clone())));
    let mut uploader = Uploader::new(pipeline, pass_through_policy(false));

    let outcome = uploader.on_drop(batch(&["A.png", "B.png"]), None).await;

    assert!(!outcome.is_success());
    assert_eq!(
        log.events(),
        vec![Event::Error(TOO_MANY_FILES_MESSAGE.to_string())]
    );
}

#[tokio::test]
async fn trigger_is_disabled_while_a_run_is_in_flight() {
    let hold = Arc::new(Hold::default());
    let harness = Harness::with_transfer({
        let hold = hold.clone();
        move |log| RecordingTransfer::held(log, hold)
    });
    let mut uploader = Uploader::new(harness.pipeline(), upload_policy(false));
    let trigger = uploader.trigger(Arc::new(StaticPicker::new(batch(&["B.png"]))));
    let mut watcher = uploader.status_watcher();

    assert!(trigger.enabled());
    assert_eq!(trigger.label(), TRIGGER_LABEL_IDLE);

    let run = uploader.on_drop(batch(&["A.png"]), None);
    let observe = async {
        hold.started.notified().await;
        assert_eq!(watcher.wait_for(Status::Busy).await, Status::Busy);

        assert!(!trigger.enabled());
        assert_eq!(trigger.label(), TRIGGER_LABEL_BUSY);
        assert!(matches!(trigger.open().await, Err(TriggerError::Disabled)));

        hold.release.notify_one();
    };

    let (outcome, ()) = tokio::join!(run, observe);

    assert!(outcome.is_success());
    assert!(trigger.enabled());
    assert_eq!(trigger.label(), TRIGGER_LABEL_IDLE);
    assert_eq!(harness.log.transfers(), vec!["A.png"]);
}

#[tokio::test]
async fn select_opens_picker_and_runs_batch() {
    let harness = Harness::new();
    let mut uploader = Uploader::new(harness.pipeline(), upload_policy(true));
    let trigger = uploader.trigger(Arc::new(StaticPicker::new(batch(&["A.png", "B.png"]))));
    let handler = harness.handler();

    let outcome = uploader.select(&trigger, Some(&handler)).await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(harness.log.transfers(), vec!["A.png", "B.png"]);
}
