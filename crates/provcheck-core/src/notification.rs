//! Verdict notifications handed from the folder worker to the UI loop.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::verdict::Verdict;

/// How often the UI loop checks the queue.
pub const NOTIFIER_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// How long a popup stays up without a key press.
pub const POPUP_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub status: Verdict,
    pub message: String,
    pub color: StatusColor,
}

impl NotificationRequest {
    pub fn for_verdict(status: Verdict) -> Self {
        let (message, color) = match status {
            Verdict::Pass => ("Test Passed", StatusColor::Green),
            Verdict::Fail => ("Test FAILED", StatusColor::Red),
        };
        Self {
            status,
            message: message.to_string(),
            color,
        }
    }
}

/// How a shown notification went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    /// Closed by a key press, the timeout, or never displayed at all.
    Closed,
    /// The operator asked to stop watching while it was up.
    Interrupted,
}

impl Dismissal {
    pub fn is_interrupted(self) -> bool {
        self == Self::Interrupted
    }
}

/// Something that can put a notification in front of the operator.
pub trait Notifier {
    type Error;

    fn show(&mut self, request: &NotificationRequest) -> Result<Dismissal, Self::Error>;
}

/// Producer half. Cheap to clone, usable from plain threads.
#[derive(Debug, Clone)]
pub struct NotificationSender {
    tx: mpsc::UnboundedSender<NotificationRequest>,
}

impl NotificationSender {
    /// Returns `false` once the consumer is gone.
    pub fn enqueue(&self, request: NotificationRequest) -> bool {
        self.tx.send(request).is_ok()
    }
}

/// Consumer half, owned by the UI loop.
#[derive(Debug)]
pub struct NotificationReceiver {
    rx: mpsc::UnboundedReceiver<NotificationRequest>,
}

impl NotificationReceiver {
    /// Pop at most one pending request without waiting.
    pub fn try_next(&mut self) -> Option<NotificationRequest> {
        self.rx.try_recv().ok()
    }
}

pub fn notification_queue() -> (NotificationSender, NotificationReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (NotificationSender { tx }, NotificationReceiver { rx })
}
