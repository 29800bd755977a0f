//! Background scheduler for the periodic video refresh.
//!
//! The first cycle runs after a short initial delay so the server can finish
//! starting; later cycles follow the configured interval.

use std::sync::Arc;
use std::time::Duration;

use miltontv_core::videos::VideoRefresher;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

#[derive(Debug, Clone, Copy)]
pub struct SchedulerSettings {
    pub initial_delay: Duration,
    pub interval: Duration,
}

/// Running scheduler. Dropping the handle also ends the loop.
pub struct SchedulerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signals the loop to stop and waits for it. A cycle in progress is
    /// abandoned between two writes.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            error!("Video refresh scheduler task failed: {}", e);
        }
        info!("Video refresh scheduler stopped");
    }
}

/// Spawns the refresh loop. A zero interval is rejected.
pub fn start_video_refresh_scheduler(
    refresher: Arc<VideoRefresher>,
    settings: SchedulerSettings,
) -> anyhow::Result<SchedulerHandle> {
    if settings.interval.is_zero() {
        anyhow::bail!("Video refresh interval must be greater than zero");
    }
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        info!(
            "Video refresh scheduler started ({}s interval, first run in {}s)",
            settings.interval.as_secs(),
            settings.initial_delay.as_secs()
        );

        tokio::select! {
            _ = tokio::time::sleep(settings.initial_delay) => {}
            _ = shutdown_rx.changed() => return,
        }

        // interval_at skips the immediate first tick of a plain interval
        let mut ticker = interval_at(Instant::now() + settings.interval, settings.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            // A cycle in progress is dropped on shutdown; each write is its own transaction
            tokio::select! {
                _ = run_scheduled_refresh(&refresher) => {}
                _ = shutdown_rx.changed() => {
                    info!("Video refresh cycle interrupted by shutdown");
                    break;
                }
            }
            tokio::select! {
                _ = ticker.tick() => {}
                _ = shutdown_rx.changed() => break,
            }
        }
    });

    Ok(SchedulerHandle { shutdown_tx, task })
}

/// Runs a single refresh cycle, logging its outcome.
async fn run_scheduled_refresh(refresher: &VideoRefresher) {
    info!("Running scheduled video refresh...");
    match refresher.run_cycle().await {
        Ok(summary) => info!(
            refreshed = summary.tickers_refreshed,
            failed = summary.tickers_failed,
            evicted = summary.videos_evicted,
            upserted = summary.videos_upserted,
            "Scheduled video refresh complete"
        ),
        Err(e) => error!("Scheduled video refresh failed: {}", e),
    }
}
