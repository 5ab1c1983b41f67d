//! Handler registry: job identifier → handler, fixed after start-up.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{JobError, Result};
use crate::payload::Payload;

/// A job's work. Implementations must not assume any particular payload
/// shape — a missing key means "use the handler default".
///
/// Handlers run on the scheduler's blocking execution context, so blocking
/// bodies (sleeps, shell invocations) are acceptable here and nowhere else
/// in the runtime.
pub trait JobHandler: Send + Sync {
    fn run(&self, payload: &Payload);
}

impl<F> JobHandler for F
where
    F: Fn(&Payload) + Send + Sync,
{
    fn run(&self, payload: &Payload) {
        self(payload)
    }
}

/// Maps job identifiers to handlers.
///
/// Populated mutably at process start, then frozen behind an `Arc` before
/// the first registration request is accepted. After the freeze it is only
/// ever read, so lookups need no synchronization.
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn JobHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Bind a handler to an identifier.
    ///
    /// Registering the same identifier twice is a configuration error and
    /// fails with [`JobError::DuplicateHandler`] so it surfaces at start-up
    /// rather than at request time.
    pub fn register<H>(&mut self, id: impl Into<String>, handler: H) -> Result<()>
    where
        H: JobHandler + 'static,
    {
        let id = id.into();
        if self.handlers.contains_key(&id) {
            return Err(JobError::DuplicateHandler(id));
        }
        self.handlers.insert(id, Arc::new(handler));
        Ok(())
    }

    /// Handler bound to `id`, if any.
    pub fn lookup(&self, id: &str) -> Option<Arc<dyn JobHandler>> {
        self.handlers.get(id).cloned()
    }

    /// Whether a handler is bound to `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    /// Registered job identifiers, sorted.
    pub fn job_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut registry = HandlerRegistry::new();
        registry.register("hello", |_: &Payload| {}).unwrap();

        assert!(registry.contains("hello"));
        assert!(registry.lookup("hello").is_some());
        assert!(registry.lookup("Hello").is_none()); // case-sensitive
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = HandlerRegistry::new();
        registry.register("hello", |_: &Payload| {}).unwrap();

        let err = registry.register("hello", |_: &Payload| {}).unwrap_err();
        assert!(matches!(err, JobError::DuplicateHandler(id) if id == "hello"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn job_ids_are_sorted() {
        let mut registry = HandlerRegistry::new();
        registry.register("db-dump", |_: &Payload| {}).unwrap();
        registry.register("cleanup", |_: &Payload| {}).unwrap();
        registry.register("hello", |_: &Payload| {}).unwrap();

        assert_eq!(registry.job_ids(), vec!["cleanup", "db-dump", "hello"]);
    }
}
