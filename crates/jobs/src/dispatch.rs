//! Dispatcher: the bridge from a scheduler firing to a handler invocation.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::payload::PayloadStore;
use crate::registry::HandlerRegistry;

/// Resolves identifier → payload and identifier → handler when a schedule
/// fires, and invokes the handler.
///
/// Invoked only from the scheduler's own execution context. All failures on
/// this path are one-way: logged, never propagated, so one failing job
/// cannot destabilize the scheduler or other jobs.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<HandlerRegistry>,
    payloads: Arc<PayloadStore>,
}

impl Dispatcher {
    pub fn new(registry: Arc<HandlerRegistry>, payloads: Arc<PayloadStore>) -> Self {
        Self { registry, payloads }
    }

    /// Run the handler bound to `id` with the payload currently stored for
    /// it. The payload is re-fetched on every firing, so a job scheduled
    /// earlier observes later payload updates.
    pub fn dispatch(&self, id: &str) {
        // Unreachable while the job's schedule is active (registration
        // validates the id first), but the scheduler is an external
        // collaborator — log and return instead of trusting it.
        let Some(handler) = self.registry.lookup(id) else {
            warn!(job_id = %id, "fired job has no registered handler, skipping");
            return;
        };

        let payload = self.payloads.get(id);
        debug!(job_id = %id, "dispatching job");

        if let Err(panic) = catch_unwind(AssertUnwindSafe(|| handler.run(&payload))) {
            error!(
                job_id = %id,
                "job handler panicked: {}",
                panic_message(&panic)
            );
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::payload::Payload;
    use crate::registry::HandlerRegistry;

    fn payload_of(value: serde_json::Value) -> Payload {
        value.as_object().expect("object literal").clone()
    }

    #[test]
    fn dispatch_invokes_handler_with_stored_payload() {
        let seen: Arc<Mutex<Option<Payload>>> = Arc::new(Mutex::new(None));
        let seen_by_handler = seen.clone();

        let mut registry = HandlerRegistry::new();
        registry
            .register("hello", move |payload: &Payload| {
                *seen_by_handler.lock().unwrap() = Some(payload.clone());
            })
            .unwrap();

        let payloads = Arc::new(PayloadStore::new());
        payloads.put("hello", payload_of(json!({"name": "Ada", "count": 3})));

        let dispatcher = Dispatcher::new(Arc::new(registry), payloads);
        dispatcher.dispatch("hello");

        let observed = seen.lock().unwrap().clone().expect("handler ran");
        assert_eq!(observed.get("name"), Some(&json!("Ada")));
        assert_eq!(observed.get("count"), Some(&json!(3)));
    }

    #[test]
    fn dispatch_missing_payload_passes_empty_object() {
        let was_empty = Arc::new(AtomicBool::new(false));
        let flag = was_empty.clone();

        let mut registry = HandlerRegistry::new();
        registry
            .register("cleanup", move |payload: &Payload| {
                flag.store(payload.is_empty(), Ordering::SeqCst);
            })
            .unwrap();

        let dispatcher = Dispatcher::new(Arc::new(registry), Arc::new(PayloadStore::new()));
        dispatcher.dispatch("cleanup");

        assert!(was_empty.load(Ordering::SeqCst));
    }

    #[test]
    fn dispatch_unknown_id_is_a_logged_noop() {
        let dispatcher = Dispatcher::new(
            Arc::new(HandlerRegistry::new()),
            Arc::new(PayloadStore::new()),
        );
        dispatcher.dispatch("nonexistent");
    }

    #[test]
    fn panicking_handler_does_not_poison_later_dispatches() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();

        let mut registry = HandlerRegistry::new();
        registry
            .register("flaky", move |_: &Payload| {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                if n == 0 {
                    panic!("first run explodes");
                }
            })
            .unwrap();

        let dispatcher = Dispatcher::new(Arc::new(registry), Arc::new(PayloadStore::new()));
        dispatcher.dispatch("flaky");
        dispatcher.dispatch("flaky");

        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
