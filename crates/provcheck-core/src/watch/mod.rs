//! Folder watching: find the result file in a freshly created folder, judge
//! it, rename the folder and queue a notification.

pub mod locate;
pub mod processor;
pub mod service;

pub use locate::{find_result_file, locate_with_retry, RetryPolicy};
pub use processor::{FolderOutcome, FolderProcessor};
pub use service::FolderWatchService;
