//! Built-in job handlers, registered once at process start.
//!
//! These are the illustrative jobs the service ships with; everything they
//! do (sleeps, shell invocations) is allowed to block because handlers run
//! on the scheduler's blocking execution context.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;
use std::time::Duration;

use serde_json::Value;
use tracing::{error, info, warn};

use uhrwerk_core::Config;
use uhrwerk_jobs::{HandlerRegistry, Payload};

/// Register the built-in handlers. Fails if any id is registered twice,
/// which aborts start-up before the server accepts requests.
pub fn register_builtin_handlers(
    registry: &mut HandlerRegistry,
    config: &Config,
) -> uhrwerk_jobs::Result<()> {
    registry.register("hello", hello_handler)?;
    registry.register("cleanup", cleanup_handler)?;

    let db_path = config.jobs.db_path.clone();
    let default_dump = config.jobs.dump_path.clone();
    registry.register("db-dump", move |payload: &Payload| {
        db_dump(payload, &db_path, &default_dump);
    })?;

    Ok(())
}

// ── hello ─────────────────────────────────────────────────────

/// Greets whoever the payload names, six times at 10-second intervals,
/// bumping the count each round.
fn hello_handler(payload: &Payload) {
    let name = payload
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("World!");

    let mut count = payload
        .get("count")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    for _ in 0..6 {
        count += 10;
        info!("Hello, {} {}", name, count);
        thread::sleep(Duration::from_secs(10));
    }
}

// ── cleanup ───────────────────────────────────────────────────

fn cleanup_handler(_payload: &Payload) {
    info!("cleanup job fired");
}

// ── db-dump ───────────────────────────────────────────────────

/// Dump the SQLite database to a file via the `sqlite3` CLI.
///
/// `output_dir` in the payload overrides the configured default path;
/// `tables` (array of strings) restricts the dump to those tables.
fn db_dump(payload: &Payload, db_path: &Path, default_dump: &Path) {
    let output: PathBuf = match payload
        .get("output_dir")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
    {
        Some(dir) => {
            info!("Using custom output path: {}", dir);
            PathBuf::from(dir)
        }
        None => {
            info!("Using default output path: {}", default_dump.display());
            default_dump.to_path_buf()
        }
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                error!("Failed to create directory {}: {}", parent.display(), e);
                return;
            }
        }
    }

    let tables = dump_tables(payload);
    let mut dump_cmd = String::from(".dump");
    for table in &tables {
        dump_cmd.push(' ');
        dump_cmd.push_str(table);
    }

    let status = Command::new("sqlite3")
        .arg(db_path)
        .arg(format!(".output {}", output.display()))
        .arg(dump_cmd)
        .status();

    match status {
        Ok(s) if s.success() => info!("Database dumped to {}", output.display()),
        Ok(s) => error!("sqlite3 exited with {}", s),
        Err(e) => error!("Failed to dump database: {}", e),
    }
}

/// Table names from the payload's `tables` array; non-string entries are
/// skipped with a warning.
fn dump_tables(payload: &Payload) -> Vec<String> {
    let Some(entries) = payload.get("tables").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut tables = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.as_str() {
            Some(table) => tables.push(table.to_string()),
            None => warn!("Ignoring non-string tables entry: {}", entry),
        }
    }
    tables
}
