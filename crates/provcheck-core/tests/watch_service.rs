use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use provcheck_core::{notification_queue, StatusColor, Verdict, WatchSettings};
use provcheck_core::watch::FolderWatchService;

fn settings(root: &Path, retry_count: u32) -> WatchSettings {
    WatchSettings {
        watch_path: root.to_path_buf(),
        retry_count,
        retry_delay: Duration::from_millis(50),
    }
}

fn wait_for(deadline: Duration, mut check: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if check() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(25));
    }
    check()
}

/// Write the result file under a temporary name first so the watcher never
/// sees a half-written CSV.
fn drop_result_file(folder: &Path, body: &str) {
    let staging = folder.join("result.partial");
    fs::write(&staging, body).unwrap();
    fs::rename(&staging, folder.join("result.csv")).unwrap();
}

#[test]
fn test_new_folder_is_renamed_and_announced() {
    let tmp = tempfile::tempdir().unwrap();
    let (tx, mut rx) = notification_queue();
    let service = FolderWatchService::start(&settings(tmp.path(), 100), tx).unwrap();
    assert_eq!(service.watch_path(), tmp.path());

    let folder = tmp.path().join("run-0001");
    fs::create_dir(&folder).unwrap();
    drop_result_file(
        &folder,
        "Total test cases,10\nPassed,9\nProvisioned Device Number,DEV1\n",
    );

    let target = tmp.path().join("DEV1_FAIL");
    assert!(
        wait_for(Duration::from_secs(10), || target.is_dir()),
        "folder was not renamed"
    );
    assert!(target.join("result.csv").is_file());

    let mut note = None;
    assert!(wait_for(Duration::from_secs(5), || {
        note = note.take().or_else(|| rx.try_next());
        note.is_some()
    }));
    let note = note.unwrap();
    assert_eq!(note.status, Verdict::Fail);
    assert_eq!(note.color, StatusColor::Red);

    service.stop();
}

#[test]
fn test_files_created_in_root_are_ignored() {
    let tmp = tempfile::tempdir().unwrap();
    let (tx, mut rx) = notification_queue();
    let service = FolderWatchService::start(&settings(tmp.path(), 0), tx).unwrap();

    fs::write(
        tmp.path().join("stray.csv"),
        "Total test cases,1\nPassed,1\nProvisioned Device Number,DEV2\n",
    )
    .unwrap();

    std::thread::sleep(Duration::from_millis(500));
    service.stop();

    assert!(rx.try_next().is_none());
    assert!(!tmp.path().join("DEV2_PASS").exists());
}

#[test]
fn test_start_fails_for_missing_root() {
    let tmp = tempfile::tempdir().unwrap();
    let (tx, _rx) = notification_queue();
    let missing = tmp.path().join("missing");
    let err = FolderWatchService::start(&settings(&missing, 0), tx)
        .err()
        .expect("subscription must fail");
    assert!(err.to_string().contains("missing"));
}
