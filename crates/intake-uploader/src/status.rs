//! Busy/idle status of an upload pipeline.
//!
//! The pipeline owns the only [`watch::Sender`]; everything else observes the
//! status through a [`StatusWatcher`].

use std::fmt;
use tokio::sync::watch;

use intake_core::constants::{TRIGGER_LABEL_BUSY, TRIGGER_LABEL_IDLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Busy,
}

impl Status {
    pub fn is_busy(self) -> bool {
        self == Status::Busy
    }

    /// Label shown on the trigger affordance.
    pub fn label(self) -> &'static str {
        match self {
            Status::Idle => TRIGGER_LABEL_IDLE,
            Status::Busy => TRIGGER_LABEL_BUSY,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "idle"),
            Status::Busy => write!(f, "busy"),
        }
    }
}

/// Read-only view of a pipeline's status.
#[derive(Debug, Clone)]
pub struct StatusWatcher {
    rx: watch::Receiver<Status>,
}

impl StatusWatcher {
    pub(crate) fn new(rx: watch::Receiver<Status>) -> Self {
        Self { rx }
    }

    pub fn current(&self) -> Status {
        *self.rx.borrow()
    }

    pub fn is_busy(&self) -> bool {
        self.current().is_busy()
    }

    /// Whether the status was written since this watcher last looked.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait until the status equals `target`.
    ///
    /// Returns immediately if it already does. Returns the last seen status if
    /// the pipeline is dropped first.
    pub async fn wait_for(&mut self, target: Status) -> Status {
        let reached = self
            .rx
            .wait_for(|status| *status == target)
            .await
            .map(|status| *status);
        reached.unwrap_or_else(|_| *self.rx.borrow())
    }
}

/// Holds the status at Busy for its lifetime.
///
/// Dropping the guard, including during unwinding, resets it to Idle.
pub(crate) struct BusyGuard<'a> {
    tx: &'a watch::Sender<Status>,
}

impl<'a> BusyGuard<'a> {
    pub(crate) fn enter(tx: &'a watch::Sender<Status>) -> Self {
        tx.send_replace(Status::Busy);
        Self { tx }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.tx.send_replace(Status::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_toggles_status() {
        let (tx, rx) = watch::channel(Status::Idle);
        let watcher = StatusWatcher::new(rx);

        {
            let _guard = BusyGuard::enter(&tx);
            assert!(watcher.is_busy());
            assert_eq!(watcher.current().label(), TRIGGER_LABEL_BUSY);
        }

        assert_eq!(watcher.current(), Status::Idle);
        assert_eq!(watcher.current().label(), TRIGGER_LABEL_IDLE);
    }

    #[test]
    fn guard_resets_on_panic() {
        let (tx, rx) = watch::channel(Status::Idle);
        let watcher = StatusWatcher::new(rx);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = BusyGuard::enter(&tx);
            panic!("handler blew up");
        }));

        assert!(result.is_err());
        assert_eq!(watcher.current(), Status::Idle);
    }

    #[tokio::test]
    async fn wait_for_returns_when_already_there() {
        let (_tx, rx) = watch::channel(Status::Idle);
        let mut watcher = StatusWatcher::new(rx);
        assert_eq!(watcher.wait_for(Status::Idle).await, Status::Idle);
    }
}
