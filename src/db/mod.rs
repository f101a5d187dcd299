use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::AppResult;

pub mod kv_store;
pub mod repositories;

const SCHEMA_SQL: &str = include_str!("schema.sql");
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the wall's SQLite file. Each operation opens its own connection;
/// the schema and journal mode are applied once, when the handle is created.
#[derive(Clone, Debug)]
pub struct DbPool {
    path: PathBuf,
}

impl DbPool {
    pub fn new<P: Into<PathBuf>>(path: P) -> AppResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let pool = Self { path };
        pool.bootstrap()?;
        info!(target: "app::db", db_path = %pool.path.display(), "database ready");
        Ok(pool)
    }

    /// Creates the tables and switches the file to WAL. Both persist in the
    /// database file, so later connections skip them.
    fn bootstrap(&self) -> AppResult<()> {
        let conn = self.connect()?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    fn connect(&self) -> AppResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        debug!(target: "app::db", db_path = %self.path.display(), "opened connection");
        Ok(conn)
    }

    pub fn with_connection<F, T>(&self, callback: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let conn = self.connect()?;
        callback(&conn)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
