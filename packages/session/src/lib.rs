//! Stateful session baseline
//!
//! An in-memory registry of server-side sessions with a sliding idle
//! timeout. It is the comparison point for stateless tokens: every live user
//! costs server memory here, and every check is a lookup.

mod config;
mod error;
mod stats;
mod store;
mod types;

pub use config::{DEFAULT_AVG_SESSION_BYTES, DEFAULT_SESSION_TTL_SECS, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use stats::SessionStats;
pub use store::SessionStore;
pub use types::{SESSION_ID_BYTES, Session, SessionId, UserData};
