//! In-memory session store with sliding expiry
//!
//! Expired sessions are removed lazily, on the first access after their idle
//! timeout; there is no background sweep. Expiry checks, refreshes and
//! deletions happen under the map's per-shard entry lock, so a session is
//! never refreshed and deleted by two racing callers.

use crate::{
    config::SessionConfig,
    error::{SessionError, SessionResult},
    stats::{Counters, SessionStats},
    types::{Session, SessionId, UserData},
};
use dashmap::{DashMap, mapref::entry::Entry};
use sigil_common::{AuthConfig, LoggingTransformer, SharedClock, SystemClock};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Server-side session registry
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    config: SessionConfig,
    clock: SharedClock,
    counters: Counters,
    closed: AtomicBool,
}

impl SessionStore {
    /// Open an empty store.
    #[must_use]
    pub fn open(config: SessionConfig, clock: SharedClock) -> Self {
        tracing::info!(ttl = config.ttl.num_seconds(), "session store opened");
        Self {
            sessions: DashMap::new(),
            config,
            clock,
            counters: Counters::default(),
            closed: AtomicBool::new(false),
        }
    }

    /// Open a store on the system clock with the configured session TTL.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::open(SessionConfig::from_auth_config(config), SystemClock::shared())
    }

    /// Store configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Create a session for `user` and return its id.
    pub fn create(&self, user: UserData) -> SessionResult<SessionId> {
        self.ensure_open()?;

        let id = SessionId::generate();
        let session = Session::new(id.clone(), user, self.clock.now());
        self.sessions.insert(id.as_str().to_owned(), session);

        // Lost a race with close(): undo so nothing outlives the store.
        if self.closed.load(Ordering::Acquire) {
            self.sessions.remove(id.as_str());
            return Err(SessionError::Closed);
        }

        self.counters.record_created();
        tracing::debug!(session = %id.redacted(), "session created");
        Ok(id)
    }

    /// Look up a session and restart its idle timeout.
    ///
    /// A session idle for longer than the TTL is deleted and reported as
    /// [`SessionError::Expired`]; later lookups see [`SessionError::NotFound`].
    pub fn validate(&self, id: impl AsRef<str>) -> SessionResult<Session> {
        self.ensure_open()?;
        let id = id.as_ref();
        let now = self.clock.now();

        let Entry::Occupied(mut entry) = self.sessions.entry(id.to_owned()) else {
            return Err(SessionError::NotFound);
        };

        if entry.get().is_expired_at(now, self.config.ttl) {
            entry.remove();
            self.counters.record_expired();
            tracing::debug!(session = %LoggingTransformer::redact(id), "session expired");
            return Err(SessionError::Expired);
        }

        let session = entry.get_mut();
        session.last_accessed = now;
        Ok(session.clone())
    }

    /// Delete a session. Returns whether it existed.
    pub fn invalidate(&self, id: impl AsRef<str>) -> SessionResult<bool> {
        self.ensure_open()?;
        let removed = self.sessions.remove(id.as_ref()).is_some();
        if removed {
            self.counters.record_invalidated();
        }
        Ok(removed)
    }

    /// Number of sessions held, including expired ones not yet accessed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Approximate memory held by sessions, in bytes.
    #[must_use]
    pub fn memory_footprint_estimate(&self) -> usize {
        self.len().saturating_mul(self.config.avg_session_bytes)
    }

    /// Activity counters.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.counters.snapshot(self.len())
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Drop every session and refuse further operations.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let dropped = self.sessions.len();
        self.sessions.clear();
        tracing::info!(dropped, "session store closed");
    }

    fn ensure_open(&self) -> SessionResult<()> {
        if self.is_closed() {
            return Err(SessionError::Closed);
        }
        Ok(())
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.sessions.len())
            .field("config", &self.config)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sigil_common::ManualClock;
    use std::sync::Arc;

    fn store() -> (SessionStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::at_unix(1_700_000_000));
        (SessionStore::open(SessionConfig::default(), clock.clone()), clock)
    }

    #[test]
    fn validate_refreshes_last_accessed() {
        let (store, clock) = store();
        let id = store.create(UserData::new(1)).unwrap();
        let created = store.validate(&id).unwrap().created_at;

        clock.advance(Duration::minutes(20));
        let session = store.validate(&id).unwrap();
        assert_eq!(session.created_at, created);
        assert_eq!(session.last_accessed, created + Duration::minutes(20));

        // 40 minutes after creation, but only 20 idle: still alive.
        clock.advance(Duration::minutes(20));
        assert!(store.validate(&id).is_ok());
    }

    #[test]
    fn idle_timeout_boundary() {
        let (store, clock) = store();
        let id = store.create(UserData::new(1)).unwrap();

        clock.advance(Duration::minutes(30));
        assert!(store.validate(&id).is_ok());

        clock.advance(Duration::minutes(30) + Duration::seconds(1));
        assert_eq!(store.validate(&id), Err(SessionError::Expired));
        assert_eq!(store.validate(&id), Err(SessionError::NotFound));
        assert_eq!(store.stats().expired, 1);
    }

    #[test]
    fn invalidate_removes_the_session() {
        let (store, _) = store();
        let id = store.create(UserData::new(1)).unwrap();

        assert_eq!(store.invalidate(&id), Ok(true));
        assert_eq!(store.invalidate(&id), Ok(false));
        assert_eq!(store.validate(&id), Err(SessionError::NotFound));
        assert_eq!(store.stats().invalidated, 1);
    }

    #[test]
    fn footprint_tracks_live_sessions() {
        let (store, _) = store();
        assert_eq!(store.memory_footprint_estimate(), 0);

        for user_id in 0..5 {
            store.create(UserData::new(user_id)).unwrap();
        }
        assert_eq!(store.memory_footprint_estimate(), 5 * 200);

        let stats = store.stats();
        assert_eq!(stats.active, 5);
        assert_eq!(stats.total_created, 5);
    }

    #[test]
    fn closed_store_refuses_everything() {
        let (store, _) = store();
        let id = store.create(UserData::new(1)).unwrap();

        store.close();
        store.close();
        assert!(store.is_closed());
        assert!(store.is_empty());
        assert_eq!(store.create(UserData::new(2)), Err(SessionError::Closed));
        assert_eq!(store.validate(&id), Err(SessionError::Closed));
        assert_eq!(store.invalidate(&id), Err(SessionError::Closed));
    }

    #[test]
    fn from_config_uses_session_ttl() {
        let config = AuthConfig::new("secret")
            .unwrap()
            .with_session_ttl(Duration::minutes(5));
        let store = SessionStore::from_config(&config);
        assert_eq!(store.config().ttl, Duration::minutes(5));
    }
}
