//! Session store configuration

use chrono::Duration;
use sigil_common::AuthConfig;

/// Default idle timeout, in seconds.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 30 * 60;

/// Rough per-session footprint used for memory estimates, in bytes.
pub const DEFAULT_AVG_SESSION_BYTES: usize = 200;

/// Session store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Idle timeout; every successful validation restarts it.
    pub ttl: Duration,
    /// Estimated bytes per live session.
    pub avg_session_bytes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::seconds(DEFAULT_SESSION_TTL_SECS),
            avg_session_bytes: DEFAULT_AVG_SESSION_BYTES,
        }
    }
}

impl SessionConfig {
    /// Configuration with the session TTL from `config`.
    #[must_use]
    pub fn from_auth_config(config: &AuthConfig) -> Self {
        Self::default().with_ttl(config.session_ttl)
    }

    /// Override the idle timeout.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Override the per-session size estimate.
    #[must_use]
    pub fn with_avg_session_bytes(mut self, bytes: usize) -> Self {
        self.avg_session_bytes = bytes;
        self
    }
}
