//! Configuration management for the task list.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::loader::{DEFAULT_BASE_URL, DEFAULT_SEED_LIMIT};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "todos=info,todo_master_runtime=info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Remote seed endpoint
    pub seed: SeedConfig,
    /// Logging
    pub log: LogConfig,
}

/// Remote seed endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Base URL of the todo collection endpoint
    pub base_url: String,
    /// Number of items requested
    pub limit: usize,
    /// How long the CLI waits for the seed before rendering anyway (seconds)
    pub wait_secs: u64,
}

impl SeedConfig {
    /// Seed wait as a `Duration`
    #[must_use]
    pub const fn wait(&self) -> Duration {
        Duration::from_secs(self.wait_secs)
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_SEED_LIMIT,
            wait_secs: 10,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `TODO_API_BASE_URL` | `https://dummyjson.com` |
    /// | `TODO_SEED_LIMIT` | `10` |
    /// | `TODO_SEED_WAIT_SECS` | `10` |
    /// | `RUST_LOG` | `todos=info,todo_master_runtime=info` |
    ///
    /// Values that fail to parse fall back to their default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed_defaults = SeedConfig::default();

        Self {
            seed: SeedConfig {
                base_url: lookup("TODO_API_BASE_URL")
                    .filter(|url| !url.trim().is_empty())
                    .unwrap_or(seed_defaults.base_url),
                limit: lookup("TODO_SEED_LIMIT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(seed_defaults.limit),
                wait_secs: lookup("TODO_SEED_WAIT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(seed_defaults.wait_secs),
            },
            log: LogConfig {
                filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
