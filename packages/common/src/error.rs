//! Configuration errors

use thiserror::Error;

/// Errors raised while loading [`AuthConfig`](crate::AuthConfig)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The secret variable is unset
    #[error("signing secret is not configured (set {0})")]
    MissingSecret(&'static str),

    /// The secret is present but empty
    #[error("signing secret is empty")]
    EmptySecret,

    /// A duration variable is not a non-negative integer
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Result type for configuration loading
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
