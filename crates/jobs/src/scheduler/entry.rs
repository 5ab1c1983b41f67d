//! Per-job schedule entry types.

use chrono::{DateTime, Utc};
use cron::Schedule;
use serde::Serialize;

use super::TriggerFn;

/// Internal scheduler state for a single job.
pub(crate) struct CronEntry {
    /// Normalized 6-field cron expression (seconds prepended).
    pub expression: String,
    /// Parsed schedule the expression compiled to.
    pub schedule: Schedule,
    /// Next instant this entry fires; `None` when the schedule has no
    /// upcoming occurrence.
    pub next_run: Option<DateTime<Utc>>,
    /// Closure fired on each due tick.
    pub trigger: TriggerFn,
}

/// Read-only view of a scheduled job, for listings.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledJob {
    pub id: String,
    pub expression: String,
    pub next_run: Option<DateTime<Utc>>,
}
