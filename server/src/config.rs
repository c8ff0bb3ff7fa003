//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// Enable debug logging (default: false)
    pub verbose: bool,

    /// Delay before the first webhook callback of a message (default: 500ms)
    pub webhook_delay: Duration,

    /// Timeout for a single webhook HTTP call (default: 30s)
    pub webhook_timeout: Duration,

    /// How long shutdown waits for in-flight webhook sequences (default: 5s)
    pub shutdown_drain: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            verbose: env::var("VERBOSE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            webhook_delay: Duration::from_millis(
                parse_optional("WEBHOOK_DELAY_MS")?.unwrap_or(500),
            ),
            webhook_timeout: Duration::from_secs(
                parse_optional("WEBHOOK_TIMEOUT_SECS")?.unwrap_or(30),
            ),
            shutdown_drain: Duration::from_secs(
                parse_optional("SHUTDOWN_DRAIN_SECS")?.unwrap_or(5),
            ),
        })
    }

    /// Default log filter when `RUST_LOG` is not set.
    #[must_use]
    pub const fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "wamock_server=debug,tower_http=debug"
        } else {
            "wamock_server=info,tower_http=info"
        }
    }

    /// Create a default configuration for testing.
    ///
    /// Uses a short webhook delay so delivery tests finish quickly.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:0".into(),
            verbose: true,
            webhook_delay: Duration::from_millis(50),
            webhook_timeout: Duration::from_secs(5),
            shutdown_drain: Duration::from_secs(1),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Parse an optional numeric variable; present but malformed values are errors.
fn parse_optional(name: &str) -> Result<Option<u64>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a non-negative integer, got {raw:?}")),
        Err(_) => Ok(None),
    }
}
