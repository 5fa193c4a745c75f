use crate::{env_parse_or_default, ConfigError, FromEnv};
use std::time::Duration;

/// Fixed-window request accounting configuration.
///
/// The window and ceiling feed the rate-usage middleware; every request
/// inside a window increments the per-client counter, and the counter
/// resets when the window rolls over.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    /// Window length in seconds
    pub window_secs: u64,
    /// Maximum requests allowed per client per window
    pub max_requests: u64,
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl FromEnv for RateLimitConfig {
    /// Reads from environment variables with defaults:
    /// - RATE_LIMIT_WINDOW_SECS: defaults to 300 (5 minutes)
    /// - RATE_LIMIT_MAX_REQUESTS: defaults to 10000
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            window_secs: env_parse_or_default("RATE_LIMIT_WINDOW_SECS", 300)?,
            max_requests: env_parse_or_default("RATE_LIMIT_MAX_REQUESTS", 10_000)?,
        })
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 300,
            max_requests: 10_000,
        }
    }
}
