use anyhow::{Context, Result};

use provcheck_core::config::default_config_path;
use provcheck_core::notification::NOTIFIER_POLL_INTERVAL;
use provcheck_core::watch::FolderWatchService;
use provcheck_core::{notification_queue, Dismissal, NotificationRequest, Notifier, WatchSettings};

use super::notifier::OperatorNotifier;
use crate::cli::args::WatchArgs;
use crate::exit_codes;

pub async fn run(args: WatchArgs) -> Result<i32> {
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    eprintln!("Loading config file: {}", config_path.display());

    let settings = match WatchSettings::load(&config_path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(exit_codes::FAILURE);
        }
    };

    if !settings.watch_path.exists() {
        eprintln!("Watch path does not exist: {}", settings.watch_path.display());
        return Ok(exit_codes::SUCCESS);
    }

    let (sender, mut queue) = notification_queue();
    let service = FolderWatchService::start(&settings, sender)
        .with_context(|| format!("failed to watch {}", settings.watch_path.display()))?;
    eprintln!("Press Ctrl+C to stop.\n");

    let mut notifier = OperatorNotifier::new(args.headless);
    if notifier.is_headless() {
        eprintln!("Verdicts are logged only (headless).");
    }
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                eprintln!("Stopping watcher.");
                break;
            }
            _ = tokio::time::sleep(NOTIFIER_POLL_INTERVAL) => {}
        }

        if let Some(request) = queue.try_next() {
            let (next, dismissal) = present(notifier, request).await?;
            notifier = next;
            if dismissal.is_interrupted() {
                eprintln!("Stopping watcher.");
                break;
            }
        }
    }

    tokio::task::spawn_blocking(move || service.stop())
        .await
        .context("folder watcher did not shut down cleanly")?;
    Ok(exit_codes::SUCCESS)
}

/// Show one notification off the runtime threads. A popup that cannot be
/// shown falls back to logging for the rest of the session.
async fn present(
    mut notifier: OperatorNotifier,
    request: NotificationRequest,
) -> Result<(OperatorNotifier, Dismissal)> {
    let (mut notifier, result, request) = tokio::task::spawn_blocking(move || {
        let result = notifier.show(&request);
        (notifier, result, request)
    })
    .await
    .context("notifier task failed")?;

    let dismissal = match result {
        Ok(dismissal) => dismissal,
        Err(e) => {
            tracing::warn!("popup unavailable, logging verdicts instead: {e:#}");
            notifier.degrade();
            notifier.show(&request)?
        }
    };
    Ok((notifier, dismissal))
}
