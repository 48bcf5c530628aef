//! Session store errors

use thiserror::Error;

/// Session operation result type
pub type SessionResult<T> = Result<T, SessionError>;

/// Session lookup and lifecycle errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No session with that id
    #[error("session not found")]
    NotFound,
    /// The session outlived its idle timeout and was removed
    #[error("session expired")]
    Expired,
    /// The store has been closed
    #[error("session store is closed")]
    Closed,
}

impl SessionError {
    /// Stable, machine-checkable code for this error
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            SessionError::NotFound => "session_not_found",
            SessionError::Expired => "session_expired",
            SessionError::Closed => "store_closed",
        }
    }
}
