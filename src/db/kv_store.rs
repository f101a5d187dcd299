use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::db::repositories::kv_repository::KvRepository;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};

/// Durable string storage keyed by string, in the shape of browser
/// `localStorage`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

#[derive(Clone, Debug)]
pub struct SqliteKeyValueStore {
    db: DbPool,
}

impl SqliteKeyValueStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.db
            .with_connection(|conn| Ok(KvRepository::get(conn, key)?.map(|row| row.value)))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        debug!(target: "app::storage", %key, bytes = value.len(), "writing key");
        self.db
            .with_connection(|conn| KvRepository::upsert(conn, key, value))
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.db.with_connection(|conn| KvRepository::delete(conn, key))
    }
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let guard = self
            .entries
            .read()
            .map_err(|_| AppError::other("memory store lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| AppError::other("memory store lock poisoned"))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| AppError::other("memory store lock poisoned"))?;
        guard.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        (**self).remove(key)
    }
}
