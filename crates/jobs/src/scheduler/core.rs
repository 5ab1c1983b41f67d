//! [`CronScheduler`] — tick-driven scheduler keyed by job id.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::cron::parse_schedule;
use super::entry::{CronEntry, ScheduledJob};
use super::{ScheduleError, Scheduler, TriggerFn};

/// Holds one schedule entry per job id and fires due triggers from the tick
/// path.
///
/// Drive it from a `tokio::time::interval` loop that calls
/// [`tick`](CronScheduler::tick) with the current instant. Triggers never
/// fire inside [`Scheduler::add`]; installation only computes the next
/// occurrence, so a schedule cannot fire before the add call returns.
pub struct CronScheduler {
    entries: Mutex<HashMap<String, CronEntry>>,
}

impl CronScheduler {
    /// Create a new scheduler with no entries.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Collect the triggers due at `now` and advance their next occurrence.
    ///
    /// Separated from [`tick`](CronScheduler::tick) so tests can fire
    /// triggers deterministically on the current thread.
    pub fn due(&self, now: DateTime<Utc>) -> Vec<(String, TriggerFn)> {
        let mut due = Vec::new();
        let mut entries = self.entries.lock().expect("scheduler entries lock poisoned");
        for (id, entry) in entries.iter_mut() {
            let Some(next) = entry.next_run else { continue };
            if next <= now {
                due.push((id.clone(), entry.trigger.clone()));
                entry.next_run = entry.schedule.after(&now).next();
            }
        }
        due
    }

    /// Fire every trigger due at `now`, each on its own blocking task, and
    /// return how many fired.
    ///
    /// Handler bodies may block for a long time, so each firing gets its own
    /// `spawn_blocking` context; a slow job never delays other due jobs or
    /// the tick cadence. Panics that escape the dispatch boundary are logged
    /// here so the scheduler loop itself never unwinds.
    pub fn tick(&self, now: DateTime<Utc>) -> usize {
        let due = self.due(now);
        let fired = due.len();

        for (job_id, trigger) in due {
            debug!(job_id = %job_id, "schedule due, firing trigger");
            let handle = tokio::task::spawn_blocking(move || trigger());
            tokio::spawn(async move {
                if let Err(e) = handle.await {
                    warn!(job_id = %job_id, "job trigger task panicked: {}", e);
                }
            });
        }

        fired
    }

    /// Read-only listing of all scheduled jobs, sorted by id.
    pub fn jobs(&self) -> Vec<ScheduledJob> {
        let entries = self.entries.lock().expect("scheduler entries lock poisoned");
        let mut jobs: Vec<ScheduledJob> = entries
            .iter()
            .map(|(id, entry)| ScheduledJob {
                id: id.clone(),
                expression: entry.expression.clone(),
                next_run: entry.next_run,
            })
            .collect();
        jobs.sort_by(|a, b| a.id.cmp(&b.id));
        jobs
    }

    /// Whether a job is scheduled under `id`.
    pub fn contains(&self, id: &str) -> bool {
        let entries = self.entries.lock().expect("scheduler entries lock poisoned");
        entries.contains_key(id)
    }

    /// Number of scheduled jobs.
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().expect("scheduler entries lock poisoned");
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CronScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for CronScheduler {
    fn remove(&self, id: &str) {
        let mut entries = self.entries.lock().expect("scheduler entries lock poisoned");
        if entries.remove(id).is_some() {
            debug!(job_id = %id, "schedule removed");
        }
    }

    fn add(&self, id: &str, expression: &str, trigger: TriggerFn) -> Result<(), ScheduleError> {
        let (normalized, schedule) = parse_schedule(expression)?;
        let next_run = schedule.after(&Utc::now()).next();

        let mut entries = self.entries.lock().expect("scheduler entries lock poisoned");
        entries.insert(
            id.to_string(),
            CronEntry {
                expression: normalized,
                schedule,
                next_run,
                trigger,
            },
        );
        debug!(job_id = %id, expression = %expression, "schedule installed");
        Ok(())
    }
}
