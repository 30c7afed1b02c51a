use std::path::{Path, PathBuf};
use std::time::Duration;

use walkdir::WalkDir;

use crate::config::WatchSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Rescans after the initial one.
    pub retry_count: u32,
    pub retry_delay: Duration,
}

impl From<&WatchSettings> for RetryPolicy {
    fn from(settings: &WatchSettings) -> Self {
        Self {
            retry_count: settings.retry_count,
            retry_delay: settings.retry_delay,
        }
    }
}

/// First `*.csv` (any case) anywhere under `folder`. Within a directory,
/// files are looked at before descending into subdirectories. Links are not
/// descended into, and a link only matches when it points at a regular file.
pub fn find_result_file(folder: &Path) -> Option<PathBuf> {
    WalkDir::new(folder)
        .min_depth(1)
        .sort_by(|a, b| a.file_type().is_dir().cmp(&b.file_type().is_dir()))
        .into_iter()
        .filter_map(Result::ok)
        .find(|entry| is_csv_name(entry.file_name()) && entry.path().is_file())
        .map(walkdir::DirEntry::into_path)
}

fn is_csv_name(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().to_ascii_lowercase().ends_with(".csv")
}

/// Scan once, then rescan up to `retry_count` times with a blocking sleep
/// in between.
pub fn locate_with_retry(folder: &Path, policy: &RetryPolicy) -> Option<PathBuf> {
    for attempt in 0..=policy.retry_count {
        if let Some(found) = find_result_file(folder) {
            return Some(found);
        }
        if attempt < policy.retry_count {
            tracing::info!(
                attempt = attempt + 1,
                retries = policy.retry_count,
                folder = %folder.display(),
                "No CSV file found in folder, retrying ({}/{})...",
                attempt + 1,
                policy.retry_count
            );
            std::thread::sleep(policy.retry_delay);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Instant;

    #[test]
    fn test_finds_nested_csv_case_insensitively() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("logs").join("run1");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("notes.txt"), "x").unwrap();
        fs::write(nested.join("RESULT.CSV"), "Passed,1").unwrap();

        let found = find_result_file(tmp.path()).unwrap();
        assert_eq!(found, nested.join("RESULT.CSV"));
    }

    #[test]
    fn test_prefers_files_before_descending() {
        let tmp = tempfile::tempdir().unwrap();
        let sub = tmp.path().join("aaa");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("deep.csv"), "").unwrap();
        fs::write(tmp.path().join("top.csv"), "").unwrap();

        assert_eq!(find_result_file(tmp.path()).unwrap(), tmp.path().join("top.csv"));
    }

    #[test]
    fn test_directory_named_csv_is_not_a_match() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("archive.csv")).unwrap();
        assert!(find_result_file(tmp.path()).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_link_to_directory_named_csv_is_not_a_match() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("payload");
        fs::create_dir_all(&target).unwrap();
        let folder = tmp.path().join("incoming");
        fs::create_dir_all(&folder).unwrap();
        std::os::unix::fs::symlink(&target, folder.join("linked.csv")).unwrap();

        assert!(find_result_file(&folder).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_link_to_csv_file_matches() {
        let tmp = tempfile::tempdir().unwrap();
        let real = tmp.path().join("real.csv");
        fs::write(&real, "Passed,1").unwrap();
        let folder = tmp.path().join("incoming");
        fs::create_dir_all(&folder).unwrap();
        std::os::unix::fs::symlink(&real, folder.join("result.csv")).unwrap();

        assert_eq!(find_result_file(&folder), Some(folder.join("result.csv")));
    }

    #[test]
    fn test_missing_folder_yields_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(find_result_file(&tmp.path().join("gone")).is_none());
    }

    #[test]
    fn test_retry_gives_up_after_budget() {
        let tmp = tempfile::tempdir().unwrap();
        let policy = RetryPolicy {
            retry_count: 2,
            retry_delay: Duration::from_millis(20),
        };
        let started = Instant::now();
        assert!(locate_with_retry(tmp.path(), &policy).is_none());
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn test_retry_picks_up_late_file() {
        let tmp = tempfile::tempdir().unwrap();
        let folder = tmp.path().to_path_buf();
        let writer = {
            let folder = folder.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(50));
                fs::write(folder.join("late.csv"), "Passed,1").unwrap();
            })
        };
        let policy = RetryPolicy {
            retry_count: 50,
            retry_delay: Duration::from_millis(20),
        };
        let found = locate_with_retry(&folder, &policy);
        writer.join().unwrap();
        assert_eq!(found, Some(folder.join("late.csv")));
    }

    #[test]
    fn test_zero_retries_scans_once() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("r.csv"), "").unwrap();
        let policy = RetryPolicy {
            retry_count: 0,
            retry_delay: Duration::from_secs(60),
        };
        assert!(locate_with_retry(tmp.path(), &policy).is_some());
    }
}
