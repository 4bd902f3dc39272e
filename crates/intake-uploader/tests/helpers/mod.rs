//! Test helpers: recording fakes for every pipeline collaborator.
//!
//! All fakes append to one shared [`EventLog`] so tests can assert the exact
//! interleaving of transfer, registration, callback and notification calls.

#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Transfer(String),
    Register(String),
    Callback(String),
    CallbackBatch(Vec<String>),
    Success(String),
    Error(String),
    Warning(String),
}

#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    pub fn transfers(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Transfer(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn callbacks(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Callback(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn notifications(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, Event::Success(_) | Event::Error(_) | Event::Warning(_)))
            .collect()
    }
}

/// Shared event log plus fakes wired to it.
pub struct Harness {
    pub log: EventLog,
    pub transfer: Arc<fakes::RecordingTransfer>,
    pub registrar: Arc<fakes::RecordingRegistrar>,
    pub notifier: Arc<fakes::RecordingNotifier>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_transfer(fakes::RecordingTransfer::new)
    }

    pub fn with_transfer(build: impl FnOnce(EventLog) -> fakes::RecordingTransfer) -> Self {
        let log = EventLog::default();
        Self {
            transfer: Arc::new(build(log.clone())),
            registrar: Arc::new(fakes::RecordingRegistrar::new(log.clone())),
            notifier: Arc::new(fakes::RecordingNotifier::new(log.clone())),
            log,
        }
    }

    pub fn with_registrar(mut self, registrar: fakes::RecordingRegistrar) -> Self {
        self.registrar = Arc::new(registrar);
        self
    }

    pub fn pipeline(&self) -> intake_uploader::UploadPipeline {
        intake_uploader::UploadPipeline::new(
            self.transfer.clone(),
            self.registrar.clone(),
            self.notifier.clone(),
        )
    }

    pub fn handler(&self) -> fakes::RecordingHandler {
        fakes::RecordingHandler::new(self.log.clone())
    }
}
