use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::JoinHandle;

use notify::event::CreateKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use super::locate::RetryPolicy;
use super::processor::FolderProcessor;
use crate::config::WatchSettings;
use crate::errors::WatchError;
use crate::notification::NotificationSender;

/// Non-recursive subscription on the watch root plus the single worker
/// thread that handles new folders one at a time.
pub struct FolderWatchService {
    watch_path: PathBuf,
    watcher: Option<RecommendedWatcher>,
    worker: Option<JoinHandle<()>>,
}

impl FolderWatchService {
    pub fn start(
        settings: &WatchSettings,
        notifications: NotificationSender,
    ) -> Result<Self, WatchError> {
        let processor = FolderProcessor::new(RetryPolicy::from(settings), notifications);
        let subscribe_err = |source| WatchError::Subscribe {
            path: settings.watch_path.clone(),
            source,
        };

        let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
        let mut watcher = notify::recommended_watcher(tx).map_err(subscribe_err)?;
        watcher
            .watch(&settings.watch_path, RecursiveMode::NonRecursive)
            .map_err(subscribe_err)?;

        let worker = std::thread::Builder::new()
            .name("folder-worker".into())
            .spawn(move || {
                for event in rx {
                    match event {
                        Ok(event) => {
                            for folder in created_folders(&event) {
                                processor.process_new_folder(folder);
                            }
                        }
                        Err(e) => tracing::warn!("watch error: {e}"),
                    }
                }
                tracing::debug!("folder worker finished");
            })?;

        tracing::info!("Watching directory: {}", settings.watch_path.display());
        Ok(Self {
            watch_path: settings.watch_path.clone(),
            watcher: Some(watcher),
            worker: Some(worker),
        })
    }

    pub fn watch_path(&self) -> &Path {
        &self.watch_path
    }

    /// Drop the subscription and wait for the worker. A folder that is
    /// already being processed is finished first.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the watcher drops the event sender, which ends the worker loop.
        drop(self.watcher.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("folder worker panicked");
            }
        }
    }
}

impl Drop for FolderWatchService {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Paths of directories created by `event`. Backends that cannot tell files
/// from folders report `CreateKind::Any`, so the filesystem decides.
fn created_folders(event: &Event) -> impl Iterator<Item = &Path> + '_ {
    let is_create = matches!(event.kind, EventKind::Create(kind) if kind != CreateKind::File);
    event
        .paths
        .iter()
        .filter(move |p| is_create && p.is_dir())
        .map(PathBuf::as_path)
}
