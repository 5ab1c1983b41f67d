//! Scheduler collaborator: trait seam plus the tick-driven cron
//! implementation.

mod core;
mod cron;
mod entry;

use std::sync::Arc;

use thiserror::Error;

pub use self::core::CronScheduler;
pub use self::entry::ScheduledJob;

/// Trigger closure installed alongside a schedule. Fired by the scheduler
/// each time the schedule comes due.
pub type TriggerFn = Arc<dyn Fn() + Send + Sync>;

/// The narrow interface the scheduling runtime needs from the external
/// time-based scheduler.
///
/// Implementations must be callable from arbitrary contexts and must never
/// fire a trigger re-entrantly inside `add` — a newly added schedule fires
/// only after `add` has returned control.
pub trait Scheduler: Send + Sync {
    /// Remove the job scheduled under `id`. Removing a job that does not
    /// exist is a no-op, not an error. Removal cancels future firings only;
    /// an already-dispatched trigger keeps running.
    fn remove(&self, id: &str);

    /// Schedule `trigger` under `id` with the given cron expression,
    /// replacing any existing entry for `id`. A malformed expression is
    /// rejected here.
    fn add(
        &self,
        id: &str,
        expression: &str,
        trigger: TriggerFn,
    ) -> std::result::Result<(), ScheduleError>;
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The cron expression did not parse.
    #[error("invalid cron expression '{expression}': {source}")]
    InvalidExpression {
        expression: String,
        #[source]
        source: ::cron::error::Error,
    },
}
