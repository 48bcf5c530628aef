//! Unified error type for the facade

use thiserror::Error;

/// Facade result type
pub type Result<T> = std::result::Result<T, Error>;

/// Any error surfaced through [`Sigil`](crate::Sigil)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] sigil_common::ConfigError),

    /// Token issue or authentication failed
    #[cfg(feature = "jwt")]
    #[error(transparent)]
    Token(#[from] sigil_jwt::JwtError),

    /// Session lookup failed
    #[cfg(feature = "session")]
    #[error(transparent)]
    Session(#[from] sigil_session::SessionError),
}

impl Error {
    /// Stable, machine-checkable code for this error
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            #[cfg(feature = "jwt")]
            Error::Token(e) => e.kind(),
            #[cfg(feature = "session")]
            Error::Session(e) => e.kind(),
        }
    }
}
