//! Session store lifecycle and concurrency scenarios

use chrono::Duration;
use sigil_common::ManualClock;
use sigil_session::{SessionConfig, SessionError, SessionStore, UserData};
use std::collections::HashSet;
use std::sync::Arc;

fn store_with_clock() -> (Arc<SessionStore>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::starting_now());
    let store = SessionStore::open(SessionConfig::default(), clock.clone());
    (Arc::new(store), clock)
}

#[test]
fn create_validate_expire_then_not_found() {
    let (store, clock) = store_with_clock();

    let id = store.create(UserData::new(1)).unwrap();
    let session = store.validate(&id).unwrap();
    assert_eq!(session.user_id, 1);
    assert_eq!(session.id, id);

    clock.advance(store.config().ttl + Duration::seconds(1));
    assert_eq!(store.validate(&id), Err(SessionError::Expired));
    assert_eq!(store.validate(&id), Err(SessionError::NotFound));
    assert!(store.is_empty());
}

#[test]
fn unknown_ids_are_not_found() {
    let (store, _) = store_with_clock();
    assert_eq!(store.validate("no-such-session"), Err(SessionError::NotFound));
    assert_eq!(store.validate(""), Err(SessionError::NotFound));
}

#[test]
fn session_carries_user_identity() {
    let (store, _) = store_with_clock();
    let user = UserData::new(42).with_username("alice").with_role("admin");

    let id = store.create(user.clone()).unwrap();
    assert_eq!(store.validate(&id).unwrap().user(), user);
}

#[test]
fn expired_sessions_linger_until_touched() {
    let (store, clock) = store_with_clock();
    let stale = store.create(UserData::new(1)).unwrap();

    clock.advance(Duration::hours(1));
    let fresh = store.create(UserData::new(2)).unwrap();
    assert_eq!(store.len(), 2);

    assert_eq!(store.validate(&stale), Err(SessionError::Expired));
    assert!(store.validate(&fresh).is_ok());
    assert_eq!(store.len(), 1);

    let stats = store.stats();
    assert_eq!(stats.total_created, 2);
    assert_eq!(stats.expired, 1);
    assert_eq!(stats.active, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_creates_yield_distinct_ids() {
    let (store, _) = store_with_clock();

    let handles: Vec<_> = (0..1000u64)
        .map(|user_id| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.create(UserData::new(user_id)) })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let id = handle.await.unwrap().unwrap();
        ids.insert(id.to_string());
    }

    assert_eq!(ids.len(), 1000);
    assert_eq!(store.len(), 1000);
    assert_eq!(store.stats().total_created, 1000);
    assert_eq!(store.memory_footprint_estimate(), 1000 * 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_validation_and_expiry_agree() {
    let (store, clock) = store_with_clock();
    let id = store.create(UserData::new(7)).unwrap();
    clock.advance(store.config().ttl + Duration::seconds(1));

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let store = Arc::clone(&store);
            let id = id.clone();
            tokio::spawn(async move { store.validate(&id) })
        })
        .collect();

    let mut expired = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Err(SessionError::Expired) => expired += 1,
            Err(SessionError::NotFound) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    // Exactly one caller observes the expiry and deletes the record.
    assert_eq!(expired, 1);
    assert_eq!(store.stats().expired, 1);
}
