//! Contract tests for the cron registration wire format.
//!
//! Since `uhrwerk-server` is a binary crate (no lib.rs), we test the JSON
//! contract by defining mirror types and validating what clients actually
//! send and receive.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// ── Mirror types matching the cron JSON contract ──────────────────

#[derive(Debug, Deserialize)]
struct CronRequest {
    id: String,
    expression: String,
    #[serde(default)]
    payload: serde_json::Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CronResponse {
    status: String,
    id: String,
}

#[derive(Debug, Deserialize)]
struct ScheduledJobView {
    id: String,
    expression: String,
    next_run: Option<String>,
}

// ── Requests ──────────────────────────────────────────────────────

#[test]
fn registration_request_parses_full_body() {
    let body = r#"{"id":"hello","expression":"* * * * *","payload":{"name":"Celso!","count":10}}"#;
    let req: CronRequest = serde_json::from_str(body).unwrap();

    assert_eq!(req.id, "hello");
    assert_eq!(req.expression, "* * * * *");
    assert_eq!(req.payload.get("name"), Some(&json!("Celso!")));
    assert_eq!(req.payload.get("count"), Some(&json!(10)));
}

#[test]
fn registration_request_payload_defaults_to_empty_object() {
    let body = r#"{"id":"cleanup","expression":"*/5 * * * *"}"#;
    let req: CronRequest = serde_json::from_str(body).unwrap();

    assert_eq!(req.id, "cleanup");
    assert!(req.payload.is_empty());
}

#[test]
fn registration_request_with_explicit_empty_payload() {
    let body = r#"{"id":"db-dump","expression":"* * * * *","payload":{}}"#;
    let req: CronRequest = serde_json::from_str(body).unwrap();
    assert!(req.payload.is_empty());
}

#[test]
fn registration_request_nested_payload_values_survive() {
    let body = r#"{"id":"db-dump","expression":"* * * * *","payload":{"output_dir":"./backups/db.sql","tables":["users","posts"]}}"#;
    let req: CronRequest = serde_json::from_str(body).unwrap();

    assert_eq!(
        req.payload.get("tables"),
        Some(&json!(["users", "posts"]))
    );
}

#[test]
fn registration_request_missing_id_is_rejected() {
    let body = r#"{"expression":"* * * * *"}"#;
    assert!(serde_json::from_str::<CronRequest>(body).is_err());
}

// ── Responses ─────────────────────────────────────────────────────

#[test]
fn registration_response_shape() {
    let response = json!({"status": "cron registered", "id": "hello"});
    let parsed: CronResponse = serde_json::from_value(response).unwrap();

    assert_eq!(parsed.status, "cron registered");
    assert_eq!(parsed.id, "hello");
}

#[test]
fn listing_entry_shape() {
    let entry = json!({
        "id": "hello",
        "expression": "0 * * * * *",
        "next_run": "2026-08-06T12:00:00Z"
    });
    let parsed: ScheduledJobView = serde_json::from_value(entry).unwrap();

    assert_eq!(parsed.id, "hello");
    assert_eq!(parsed.expression, "0 * * * * *");
    assert!(parsed.next_run.is_some());

    let never = json!({"id": "one-shot", "expression": "0 0 1 1 1 2020", "next_run": null});
    let parsed: ScheduledJobView = serde_json::from_value(never).unwrap();
    assert!(parsed.next_run.is_none());
}
