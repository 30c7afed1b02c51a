use std::fs;
use std::path::{Path, PathBuf};

use super::locate::{locate_with_retry, RetryPolicy};
use crate::notification::{NotificationRequest, NotificationSender};
use crate::record::{
    Coercion, ResultRecord, PASSED, PROVISIONED_DEVICE_NUMBER, TOTAL_TEST_CASES,
};
use crate::verdict::{watch_verdict, Verdict};

/// What happened to one newly created folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderOutcome {
    NoResultFile,
    Unreadable { result_file: PathBuf },
    MissingDeviceNumber { result_file: PathBuf },
    InvalidCounts { total: String, passed: String },
    Renamed { to: PathBuf, verdict: Verdict },
    TargetExists { target: PathBuf, verdict: Verdict },
    RenameFailed { target: PathBuf, verdict: Verdict },
}

impl FolderOutcome {
    /// Set whenever the result file was judged, whether or not the rename went through.
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Self::Renamed { verdict, .. }
            | Self::TargetExists { verdict, .. }
            | Self::RenameFailed { verdict, .. } => Some(*verdict),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FolderProcessor {
    retry: RetryPolicy,
    notifications: NotificationSender,
}

impl FolderProcessor {
    pub fn new(retry: RetryPolicy, notifications: NotificationSender) -> Self {
        Self {
            retry,
            notifications,
        }
    }

    /// Find, judge and rename `folder` to `<device>_<PASS|FAIL>` beside it.
    /// Never overwrites an existing path. Failures are logged and reported
    /// through the outcome; nothing here panics or returns an error.
    pub fn process_new_folder(&self, folder: &Path) -> FolderOutcome {
        tracing::info!(path = %folder.display(), "New folder detected");

        let Some(result_file) = locate_with_retry(folder, &self.retry) else {
            tracing::warn!(
                path = %folder.display(),
                retries = self.retry.retry_count,
                "No CSV file found in folder after {} retries",
                self.retry.retry_count
            );
            return FolderOutcome::NoResultFile;
        };
        tracing::info!(path = %result_file.display(), "Found CSV file");

        let record = match ResultRecord::from_path(&result_file, Coercion::Verbatim) {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(path = %result_file.display(), "Error processing CSV: {e}");
                return FolderOutcome::Unreadable { result_file };
            }
        };

        let total = record.text(TOTAL_TEST_CASES).unwrap_or("0");
        let passed = record.text(PASSED).unwrap_or("0");
        let device = record.text(PROVISIONED_DEVICE_NUMBER).unwrap_or("");
        tracing::info!(total, passed, "Read test case counts");

        if device.is_empty() {
            tracing::warn!(
                path = %result_file.display(),
                "Provisioned Device Number not found in CSV."
            );
            return FolderOutcome::MissingDeviceNumber { result_file };
        }

        let (total, passed) = match (total.parse::<i64>(), passed.parse::<i64>()) {
            (Ok(t), Ok(p)) => (t, p),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!(
                    total,
                    passed,
                    "Error converting test case counts to integers: {e}"
                );
                return FolderOutcome::InvalidCounts {
                    total: total.to_string(),
                    passed: passed.to_string(),
                };
            }
        };

        let verdict = watch_verdict(total, passed);
        tracing::info!(%verdict, total, passed, device, "Status: {verdict}");
        if !self
            .notifications
            .enqueue(NotificationRequest::for_verdict(verdict))
        {
            tracing::debug!("notification consumer gone, dropping {verdict}");
        }

        let target = folder.with_file_name(format!("{device}_{}", verdict.label()));
        if fs::symlink_metadata(&target).is_ok() {
            tracing::warn!(path = %target.display(), "Target path already exists");
            return FolderOutcome::TargetExists { target, verdict };
        }

        match fs::rename(folder, &target) {
            Ok(()) => {
                tracing::info!(
                    from = %folder.display(),
                    to = %target.display(),
                    "Renamed folder"
                );
                FolderOutcome::Renamed {
                    to: target,
                    verdict,
                }
            }
            Err(e) => {
                tracing::error!(path = %target.display(), "Error renaming folder: {e}");
                FolderOutcome::RenameFailed { target, verdict }
            }
        }
    }
}
