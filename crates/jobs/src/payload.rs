//! Job payload type and the mutex-guarded payload store.

use std::collections::HashMap;
use std::sync::Mutex;

/// Structured job input: a JSON object of string keys to arbitrary values.
///
/// Supplied at registration time and read back by the dispatcher at firing
/// time. A job that was never given a payload reads as the empty object, so
/// handlers fall back to their defaults rather than failing.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Latest payload per job id, written by the registration path and read by
/// the trigger path concurrently.
///
/// A single mutex guards the map. The lock is held for one read or one
/// write only — never across scheduler add/remove calls.
pub struct PayloadStore {
    payloads: Mutex<HashMap<String, Payload>>,
}

impl PayloadStore {
    pub fn new() -> Self {
        Self {
            payloads: Mutex::new(HashMap::new()),
        }
    }

    /// Store the payload for `id`, overwriting any previous value.
    pub fn put(&self, id: &str, payload: Payload) {
        let mut guard = self.payloads.lock().expect("payload lock poisoned");
        guard.insert(id.to_string(), payload);
    }

    /// Current payload for `id`, or the empty object if none was stored.
    pub fn get(&self, id: &str) -> Payload {
        let guard = self.payloads.lock().expect("payload lock poisoned");
        guard.get(id).cloned().unwrap_or_default()
    }

    /// Drop the payload for `id`, if any.
    pub fn remove(&self, id: &str) {
        let mut guard = self.payloads.lock().expect("payload lock poisoned");
        guard.remove(id);
    }

    /// Whether a payload has been stored for `id`.
    pub fn contains(&self, id: &str) -> bool {
        let guard = self.payloads.lock().expect("payload lock poisoned");
        guard.contains_key(id)
    }

    /// Number of stored payloads.
    pub fn len(&self) -> usize {
        let guard = self.payloads.lock().expect("payload lock poisoned");
        guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PayloadStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_of(value: serde_json::Value) -> Payload {
        value.as_object().expect("object literal").clone()
    }

    #[test]
    fn get_missing_returns_empty_object() {
        let store = PayloadStore::new();
        assert!(store.get("nope").is_empty());
        assert!(!store.contains("nope"));
    }

    #[test]
    fn put_overwrites_previous_payload() {
        let store = PayloadStore::new();
        store.put("hello", payload_of(json!({"name": "Ada"})));
        store.put("hello", payload_of(json!({"name": "Grace", "count": 3})));

        let current = store.get("hello");
        assert_eq!(current.get("name"), Some(&json!("Grace")));
        assert_eq!(current.get("count"), Some(&json!(3)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let store = PayloadStore::new();
        store.put("hello", payload_of(json!({})));
        store.remove("hello");
        store.remove("hello");
        assert!(store.is_empty());
    }
}
