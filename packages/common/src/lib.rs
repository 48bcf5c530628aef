//! Common infrastructure shared by the sigil crates
//!
//! This crate provides:
//! - An injectable [`Clock`] so token and session expiry can be tested deterministically
//! - [`AuthConfig`], the opaque configuration inputs (signing secret, TTLs, clock skew)
//! - [`LoggingTransformer`], the `env_logger` bootstrap and log-redaction helpers

pub mod clock;
pub mod config;
mod error;
pub mod logging;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use config::AuthConfig;
pub use error::{ConfigError, ConfigResult};
pub use logging::LoggingTransformer;
