//! Structured logging bootstrap
//!
//! Library crates emit events through `tracing` with its `log` bridge enabled,
//! so an `env_logger` backend installed here prints them. Identifiers that
//! must show up in a log line (session ids, subjects) go through
//! [`LoggingTransformer::redact`] first.

use log::{info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging setup and secure log helpers
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging (call once at application startup)
    ///
    /// Configure levels via `RUST_LOG`:
    /// - `RUST_LOG=debug` - every issue/authenticate/session event
    /// - `RUST_LOG=info` - lifecycle events only
    /// - `RUST_LOG=sigil_jwt=debug,sigil_session=warn` - per-crate levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Fingerprint an identifier for logging
    ///
    /// Returns `#` followed by the first 12 hex chars of its SHA-256, which is
    /// enough to correlate log lines without exposing the value.
    #[must_use]
    pub fn redact(identifier: &str) -> String {
        let hash = Sha256::digest(identifier.as_bytes());
        let hex_hash = format!("{hash:x}");
        format!("#{}", &hex_hash[..12])
    }

    /// Log an authentication decision without leaking the subject
    pub fn log_auth_event(event: &str, subject: Option<&str>, success: bool) {
        if success {
            let subject = subject.map_or_else(|| "anonymous".to_string(), Self::redact);
            info!("authentication succeeded: {event} (subject: {subject})");
        } else {
            warn!("authentication failed: {event}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_is_stable_and_distinct() {
        LoggingTransformer::init_test();

        let first = LoggingTransformer::redact("session-abc");
        let second = LoggingTransformer::redact("session-xyz");

        assert_ne!(first, second);
        assert_eq!(first, LoggingTransformer::redact("session-abc"));
        assert!(first.starts_with('#'));
        assert_eq!(first.len(), 13);
        assert!(!first.contains("session"));
    }

    #[test]
    fn auth_events_do_not_panic() {
        LoggingTransformer::init_test();

        LoggingTransformer::log_auth_event("authenticate", Some("alice"), true);
        LoggingTransformer::log_auth_event("authenticate", None, true);
        LoggingTransformer::log_auth_event("authenticate", None, false);
    }
}
