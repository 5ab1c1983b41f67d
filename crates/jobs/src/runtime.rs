//! Scheduling runtime: the re-registration protocol.

use std::sync::Arc;

use tracing::{info, warn};

use crate::dispatch::Dispatcher;
use crate::error::{JobError, Result};
use crate::payload::{Payload, PayloadStore};
use crate::registry::HandlerRegistry;
use crate::scheduler::{Scheduler, TriggerFn};

/// Owns the handler registry, the payload store, and the scheduler handle,
/// and implements the remove-then-add re-registration protocol.
///
/// `schedule_job` and the dispatch path are mutually concurrent: the
/// payload mutex inside [`PayloadStore`] is the only shared mutable state,
/// and it is never held across scheduler calls.
pub struct JobRuntime {
    registry: Arc<HandlerRegistry>,
    payloads: Arc<PayloadStore>,
    scheduler: Arc<dyn Scheduler>,
    dispatcher: Dispatcher,
}

impl JobRuntime {
    /// Wire a frozen registry to a scheduler. The registry must already
    /// contain every handler the process will ever serve.
    pub fn new(registry: Arc<HandlerRegistry>, scheduler: Arc<dyn Scheduler>) -> Self {
        let payloads = Arc::new(PayloadStore::new());
        let dispatcher = Dispatcher::new(registry.clone(), payloads.clone());
        Self {
            registry,
            payloads,
            scheduler,
            dispatcher,
        }
    }

    /// (Re)schedule the job `id` under `expression` with `payload`.
    ///
    /// Steps, in order: validate the id against the registry, store the
    /// payload, remove any existing schedule, install the new one. Storing
    /// the payload strictly before installing the schedule guarantees a
    /// firing of the new schedule never observes a missing payload.
    ///
    /// If the scheduler rejects `expression`, the old schedule is already
    /// gone: the job ends up unscheduled, not rolled back, and the error
    /// says so. Re-registering while a previous firing is mid-execution
    /// does not cancel that execution; it only stops future firings under
    /// the old schedule.
    pub fn schedule_job(&self, id: &str, expression: &str, payload: Payload) -> Result<()> {
        if !self.registry.contains(id) {
            return Err(JobError::UnknownJob(id.to_string()));
        }

        self.payloads.put(id, payload);

        self.scheduler.remove(id);

        let dispatcher = self.dispatcher.clone();
        let job_id = id.to_string();
        let trigger: TriggerFn = Arc::new(move || dispatcher.dispatch(&job_id));

        self.scheduler
            .add(id, expression, trigger)
            .map_err(|source| {
                warn!(
                    job_id = %id,
                    error = %source,
                    "schedule install failed, job left unscheduled"
                );
                JobError::ScheduleInstall {
                    id: id.to_string(),
                    source,
                }
            })?;

        info!(job_id = %id, expression = %expression, "job scheduled");
        Ok(())
    }

    /// Unschedule `id` and drop its payload. Idempotent.
    ///
    /// The schedule goes first so an active schedule never observes a
    /// missing payload; a firing already in flight keeps running and reads
    /// the empty payload at worst.
    pub fn remove_job(&self, id: &str) {
        self.scheduler.remove(id);
        self.payloads.remove(id);
        info!(job_id = %id, "job unscheduled");
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn payloads(&self) -> &PayloadStore {
        &self.payloads
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
