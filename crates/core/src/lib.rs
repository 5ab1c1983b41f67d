//! Shared configuration for the uhrwerk workspace.

pub mod config;

pub use config::Config;
