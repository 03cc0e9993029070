// SQLite-backed key-value store for session and league-connection state.
//
// Stands in for browser local storage: string keys, JSON values. Values are
// serialized with serde_json on write and deserialized on read; a row that
// no longer parses as the expected shape surfaces as `StoreError::Corrupt`,
// distinct from an absent key.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("stored value for key `{key}` is not valid JSON for the expected type: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize value for key `{key}`: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

/// SQLite-backed JSON key-value store.
pub struct KvStore {
    conn: Mutex<Connection>,
}

impl KvStore {
    /// Open (or create) the store at `path` and ensure the table exists.
    /// Pass `":memory:"` for an ephemeral store (useful for tests).
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )?;

        Ok(KvStore {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // A poisoned mutex means another thread panicked mid-write; the
        // store itself is still usable.
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Read and deserialize the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent, `StoreError::Corrupt` when
    /// the stored text does not parse as `T`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let conn = self.lock();
        let text: Option<String> = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;

        match text {
            None => Ok(None),
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    key: key.to_string(),
                    source: e,
                }),
        }
    }

    /// Serialize `value` and write it under `key`, replacing any prior value.
    pub fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string(value).map_err(|e| StoreError::Encode {
            key: key.to_string(),
            source: e,
        })?;
        let now = chrono::Utc::now().to_rfc3339();
        let conn = self.lock();
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, text, now],
        )?;
        Ok(())
    }

    /// Remove `key` if present. Removing an absent key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        let conn = self.lock();
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Write a raw string under `key`, bypassing JSON encoding. Used by tests
    /// to simulate corrupted rows.
    #[cfg(test)]
    pub(crate) fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let now = chrono::Utc::now().to_rfc3339();
        let conn = self.lock();
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, now],
        )?;
        Ok(())
    }
}
