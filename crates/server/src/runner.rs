//! Background scheduler loop.
//!
//! Spawns as a tokio task and drives the cron scheduler: on every tick it
//! fires the triggers that have come due. Handler bodies run on their own
//! blocking tasks, so a slow job never delays the cadence.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use uhrwerk_jobs::CronScheduler;

/// Main scheduler loop. Spawned as a tokio task from `main`.
pub async fn run_scheduler_loop(scheduler: Arc<CronScheduler>, tick_interval: Duration) {
    info!(
        "Scheduler loop started, ticking every {}s",
        tick_interval.as_secs()
    );

    let mut interval = tokio::time::interval(tick_interval);

    loop {
        interval.tick().await;
        let fired = scheduler.tick(Utc::now());
        if fired > 0 {
            debug!("Scheduler tick: {} job(s) fired", fired);
        }
    }
}
