//! Checks for device provisioning test runs.
//!
//! Two consumers share the result-file parser in [`record`]:
//!
//! - [`report`] walks a directory of station folders and builds a
//!   pass/fail table.
//! - [`watch`] reacts to new folders under a watch root, renames each one to
//!   `<device>_<PASS|FAIL>` and queues a [`notification`] for the operator.

pub mod config;
pub mod errors;
pub mod notification;
pub mod record;
pub mod report;
pub mod verdict;
pub mod watch;

pub use config::WatchSettings;
pub use errors::{ConfigError, RecordError, ReportError, WatchError};
pub use notification::{
    notification_queue, Dismissal, NotificationReceiver, NotificationRequest, NotificationSender,
    Notifier, StatusColor,
};
pub use record::{Coercion, FieldValue, ResultRecord};
pub use verdict::Verdict;
