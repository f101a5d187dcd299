use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use firstleaf_app_lib::db::kv_store::{KeyValueStore, MemoryKeyValueStore};
use firstleaf_app_lib::error::{AppError, AppResult};
use firstleaf_app_lib::models::appreciation::{AppreciationKind, AppreciationMap};
use firstleaf_app_lib::services::appreciation_service::AppreciationStore;

/// Reads work, every write fails the way a full quota would.
#[derive(Default)]
struct QuotaExceededStore {
    inner: MemoryKeyValueStore,
    attempted_writes: AtomicUsize,
}

impl KeyValueStore for QuotaExceededStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> AppResult<()> {
        self.attempted_writes.fetch_add(1, Ordering::SeqCst);
        Err(AppError::other("quota exceeded"))
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.inner.remove(key)
    }
}

struct UnreadableStore;

impl KeyValueStore for UnreadableStore {
    fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::other("storage disabled"))
    }

    fn set(&self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::other("storage disabled"))
    }

    fn remove(&self, _key: &str) -> AppResult<()> {
        Err(AppError::other("storage disabled"))
    }
}

#[test]
fn repeated_clap_keeps_a_single_count() {
    let store = AppreciationStore::new(MemoryKeyValueStore::new());

    store.record("alice", AppreciationKind::Clap);
    store.record("alice", AppreciationKind::Clap);

    let entry = store.entry("alice");
    assert_eq!(entry.counts.get("clap"), Some(&1));
    assert_eq!(entry.sent, vec!["clap".to_string()]);
}

#[test]
fn duplicate_record_writes_nothing() {
    let shared = Arc::new(MemoryKeyValueStore::new());
    let store = AppreciationStore::new(Arc::clone(&shared));

    store.record("alice", AppreciationKind::Star);
    let before = shared.get("appreciation").unwrap();
    store.record("alice", AppreciationKind::Star);
    let after = shared.get("appreciation").unwrap();

    assert_eq!(before, after);
}

#[test]
fn write_failures_are_swallowed() {
    let store = AppreciationStore::new(QuotaExceededStore::default());

    assert_eq!(store.record("bob", AppreciationKind::Party), Some(1));
    assert_eq!(store.storage().attempted_writes.load(Ordering::SeqCst), 1);
    // Nothing was persisted, so the reaction can be sent again.
    assert_eq!(store.record("bob", AppreciationKind::Party), Some(1));
    assert!(store.load().is_empty());
}

#[test]
fn read_failures_degrade_to_empty() {
    let store = AppreciationStore::new(UnreadableStore);

    assert!(store.load().is_empty());
    assert_eq!(store.summary("carol").total, 0);
    assert_eq!(store.record("carol", AppreciationKind::Heart), Some(1));
}

#[test]
fn blobs_of_the_wrong_shape_load_empty() {
    for raw in ["[]", "null", "\"text\"", r#"{"dan":{"counts":{"clap":-1}}}"#] {
        let store = AppreciationStore::new(MemoryKeyValueStore::with_entry("appreciation", raw));
        assert!(store.load().is_empty(), "{raw}");
    }
}

#[test]
fn users_are_kept_apart_and_custom_key_is_honoured() {
    let shared = Arc::new(MemoryKeyValueStore::new());
    let store = AppreciationStore::with_key(Arc::clone(&shared), "reactions");

    store.record("erin", AppreciationKind::Thanks);
    store.record("frank", AppreciationKind::Thanks);
    store.record("frank", AppreciationKind::Clap);

    assert!(shared.get("appreciation").unwrap().is_none());
    let raw = shared.get("reactions").unwrap().expect("blob");
    let map: AppreciationMap = serde_json::from_str(&raw).unwrap();
    assert_eq!(map["erin"].total(), 1);
    assert_eq!(map["frank"].total(), 2);
}
