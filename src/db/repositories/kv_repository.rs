use std::convert::TryFrom;

use rusqlite::{named_params, Connection, OptionalExtension, Row};

use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct KvRow {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

impl TryFrom<&Row<'_>> for KvRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            key: row.get("key")?,
            value: row.get("value")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

pub struct KvRepository;

impl KvRepository {
    pub fn get(conn: &Connection, key: &str) -> AppResult<Option<KvRow>> {
        let mut stmt = conn.prepare("SELECT key, value, updated_at FROM kv_store WHERE key = ?1")?;

        let row = stmt
            .query_row([key], |row| KvRow::try_from(row))
            .optional()?;

        Ok(row)
    }

    pub fn list(conn: &Connection) -> AppResult<Vec<KvRow>> {
        let mut stmt =
            conn.prepare("SELECT key, value, updated_at FROM kv_store ORDER BY key ASC")?;

        let rows = stmt
            .query_map([], |row| KvRow::try_from(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    pub fn upsert(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO kv_store (key, value)
                VALUES (:key, :value)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = CURRENT_TIMESTAMP
            "#,
            named_params! {":key": key, ":value": value},
        )?;

        Ok(())
    }

    pub fn delete(conn: &Connection, key: &str) -> AppResult<()> {
        conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
        Ok(())
    }
}
