use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub jobs: JobsConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            jobs: JobsConfig::from_env(),
        }
    }

    /// Log a one-screen summary of the effective configuration.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!(
            "  server:  host={}, port={}",
            self.server.host,
            self.server.port
        );
        tracing::info!(
            "  jobs:    tick={}s, db={}, dump={}",
            self.jobs.tick_interval_secs,
            self.jobs.db_path.display(),
            self.jobs.dump_path.display()
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 8090),
        }
    }
}

// ── Jobs ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsConfig {
    /// Seconds between scheduler ticks.
    pub tick_interval_secs: u64,
    /// SQLite database file consumed by the `db-dump` job.
    pub db_path: PathBuf,
    /// Default output path for `db-dump` when the payload supplies none.
    pub dump_path: PathBuf,
}

impl JobsConfig {
    fn from_env() -> Self {
        Self {
            tick_interval_secs: env_u64("TICK_INTERVAL_SECS", 1).max(1),
            db_path: PathBuf::from(env_or("DB_PATH", "./data/data.db")),
            dump_path: PathBuf::from(env_or("DUMP_PATH", "./dump.sql")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        // Fresh keys that no test environment sets.
        let server = ServerConfig {
            host: env_or("UHRWERK_TEST_NO_SUCH_HOST", "0.0.0.0"),
            port: env_u16("UHRWERK_TEST_NO_SUCH_PORT", 8090),
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8090);
    }

    #[test]
    fn env_u64_rejects_garbage() {
        std::env::set_var("UHRWERK_TEST_BAD_U64", "not-a-number");
        assert_eq!(env_u64("UHRWERK_TEST_BAD_U64", 7), 7);
        std::env::remove_var("UHRWERK_TEST_BAD_U64");
    }
}
