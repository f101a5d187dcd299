use tracing::{debug, info, warn};

use crate::db::kv_store::KeyValueStore;
use crate::models::appreciation::{
    AppreciationEntry, AppreciationKind, AppreciationMap, AppreciationSummary,
};

pub const DEFAULT_STORAGE_KEY: &str = "appreciation";

/// Reaction counts persisted as one JSON blob under a single storage key.
///
/// Storage and parse failures never escape: a bad read behaves like an empty
/// store and a failed write is logged and dropped.
pub struct AppreciationStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> AppreciationStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn load(&self) -> AppreciationMap {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return AppreciationMap::new(),
            Err(err) => {
                warn!(target: "app::appreciation", key = %self.key, error = %err, "failed to read appreciation data");
                return AppreciationMap::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(err) => {
                warn!(target: "app::appreciation", key = %self.key, error = %err, "discarding corrupt appreciation data");
                AppreciationMap::new()
            }
        }
    }

    pub fn save(&self, map: &AppreciationMap) {
        let raw = match serde_json::to_string(map) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(target: "app::appreciation", error = %err, "failed to serialize appreciation data");
                return;
            }
        };

        if let Err(err) = self.storage.set(&self.key, &raw) {
            warn!(target: "app::appreciation", key = %self.key, error = %err, "failed to save appreciation data");
        }
    }

    pub fn entry(&self, username: &str) -> AppreciationEntry {
        self.load().remove(username).unwrap_or_default()
    }

    pub fn summary(&self, username: &str) -> AppreciationSummary {
        AppreciationSummary::from_entry(username, &self.entry(username))
    }

    /// Sends `kind` once for `username`. Returns the new total, or `None` when
    /// that reaction was already sent.
    pub fn record(&self, username: &str, kind: AppreciationKind) -> Option<u64> {
        let mut map = self.load();
        let entry = map.entry(username.to_string()).or_default();

        if entry.has_sent(kind) {
            debug!(target: "app::appreciation", %username, %kind, "appreciation already sent");
            return None;
        }

        entry.sent.push(kind.as_str().to_string());
        let count = entry.counts.entry(kind.as_str().to_string()).or_insert(0);
        *count = count.saturating_add(1);
        let total = entry.total();

        self.save(&map);
        info!(target: "app::appreciation", %username, %kind, total, "appreciation sent");
        Some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::kv_store::MemoryKeyValueStore;

    #[test]
    fn record_is_at_most_once_per_kind() {
        let store = AppreciationStore::new(MemoryKeyValueStore::new());

        assert_eq!(store.record("alice", AppreciationKind::Clap), Some(1));
        assert_eq!(store.record("alice", AppreciationKind::Clap), None);

        let entry = store.entry("alice");
        assert_eq!(entry.sent, vec!["clap".to_string()]);
        assert_eq!(entry.count(AppreciationKind::Clap), 1);
    }

    #[test]
    fn totals_accumulate_across_kinds() {
        let store = AppreciationStore::new(MemoryKeyValueStore::new());

        store.record("bob", AppreciationKind::Heart);
        store.record("bob", AppreciationKind::Star);
        assert_eq!(store.record("bob", AppreciationKind::Party), Some(3));

        let summary = store.summary("bob");
        assert_eq!(summary.total, 3);
        assert_eq!(summary.total_label, "Total: 3 appreciations");
        assert!(summary.buttons.iter().any(|b| b.kind == AppreciationKind::Heart && b.sent));
        assert!(summary.buttons.iter().any(|b| b.kind == AppreciationKind::Clap && !b.sent));
    }

    #[test]
    fn missing_data_loads_empty() {
        let store = AppreciationStore::new(MemoryKeyValueStore::new());
        assert!(store.load().is_empty());
        assert_eq!(store.summary("nobody").total_label, "Total: 0 appreciations");
    }

    #[test]
    fn corrupt_data_loads_empty_and_is_replaced_on_write() {
        let store =
            AppreciationStore::new(MemoryKeyValueStore::with_entry(DEFAULT_STORAGE_KEY, "{oops"));
        assert!(store.load().is_empty());

        assert_eq!(store.record("carol", AppreciationKind::Thanks), Some(1));
        let raw = store.storage().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let parsed: AppreciationMap = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["carol"].count(AppreciationKind::Thanks), 1);
    }

    #[test]
    fn existing_counts_from_other_viewers_are_incremented() {
        let store = AppreciationStore::new(MemoryKeyValueStore::with_entry(
            DEFAULT_STORAGE_KEY,
            r#"{"dan":{"sent":[],"counts":{"clap":4}}}"#,
        ));

        assert_eq!(store.record("dan", AppreciationKind::Clap), Some(5));
        assert_eq!(store.entry("dan").count(AppreciationKind::Clap), 5);
    }

    #[test]
    fn huge_stored_counts_do_not_overflow() {
        let store = AppreciationStore::new(MemoryKeyValueStore::with_entry(
            DEFAULT_STORAGE_KEY,
            r#"{"x":{"sent":[],"counts":{"clap":18446744073709551615,"heart":1}}}"#,
        ));

        assert_eq!(store.summary("x").total, u64::MAX);
        assert_eq!(store.record("x", AppreciationKind::Clap), Some(u64::MAX));
        assert_eq!(store.entry("x").count(AppreciationKind::Clap), u64::MAX);
    }
}
