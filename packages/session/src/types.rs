//! Session records and identifiers

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sigil_common::LoggingTransformer;
use std::fmt;

/// Random bytes behind every session id (256 bits).
pub const SESSION_ID_BYTES: usize = 32;

/// Opaque session identifier: 32 CSPRNG bytes, hex encoded
///
/// This is a bearer credential. `Display` yields the full id for
/// transmission; `Debug` only shows a fingerprint.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub(crate) fn generate() -> Self {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Borrow the id text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fingerprint safe to log.
    #[must_use]
    pub fn redacted(&self) -> String {
        LoggingTransformer::redact(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionId").field(&self.redacted()).finish()
    }
}

/// Identity attached to a new session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    /// Application user id.
    pub user_id: u64,
    /// Display name.
    pub username: String,
    /// Authorization role.
    pub role: String,
}

impl UserData {
    /// User with an empty name and the `user` role.
    #[must_use]
    pub fn new(user_id: u64) -> Self {
        Self {
            user_id,
            username: String::new(),
            role: "user".to_string(),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Set the role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

/// A live server-side session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session id.
    pub id: SessionId,
    /// Application user id.
    pub user_id: u64,
    /// Display name.
    pub username: String,
    /// Authorization role.
    pub role: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last successful validation.
    pub last_accessed: DateTime<Utc>,
}

impl Session {
    pub(crate) fn new(id: SessionId, user: UserData, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: user.user_id,
            username: user.username,
            role: user.role,
            created_at: now,
            last_accessed: now,
        }
    }

    /// Whether the idle time at `now` exceeds `ttl`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.last_accessed) > ttl
    }

    /// The identity this session was created for.
    #[must_use]
    pub fn user(&self) -> UserData {
        UserData {
            user_id: self.user_id,
            username: self.username.clone(),
            role: self.role.clone(),
        }
    }
}
