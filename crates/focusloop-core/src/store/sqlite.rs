//! SQLite-backed store.
//!
//! A single `kv` table holds every namespaced record as JSON text. The
//! database lives at `~/.config/focusloop/focusloop.db`.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{data_dir, Store};
use crate::error::StoreError;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store at the default data directory, creating the schema
    /// if needed.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()?.join("focusloop.db");
        Self::open_at(&path)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl Store for SqliteStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::keys;

    #[test]
    fn put_overwrites_existing_value() {
        let store = SqliteStore::open_memory().unwrap();
        store.put_raw(keys::TASKS, "[]").unwrap();
        store.put_raw(keys::TASKS, "[1]").unwrap();
        assert_eq!(store.get_raw(keys::TASKS).unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn survives_reopen_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focusloop.db");
        {
            let store = SqliteStore::open_at(&path).unwrap();
            store.put_raw(keys::SESSIONS, "[]").unwrap();
        }
        let store = SqliteStore::open_at(&path).unwrap();
        assert_eq!(store.get_raw(keys::SESSIONS).unwrap().as_deref(), Some("[]"));
    }
}
