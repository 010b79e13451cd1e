//! Key-value store persisted in the embedded database.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension};

use crate::database::schema::{CREATE_KV_TABLE, DELETE_KV_VALUE, SELECT_KV_VALUE, UPSERT_KV_VALUE};
use crate::database::{Database, DatabaseConfig};
use crate::error::{Error, Result};

use super::KvStore;

/// A [`KvStore`] backed by the `kv_store` table.
///
/// Each operation is a single parameterized statement. The connection sits
/// behind a mutex so the store can be shared between threads; `SQLite`
/// provides the isolation.
///
/// # Examples
///
/// ```
/// use arcdb::kv::{KvStore, SqliteStore};
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = SqliteStore::open(dir.path().join("arc.db")).unwrap();
/// store.set("repo:last", b"arc-sdk").unwrap();
/// assert_eq!(store.get("repo:last").unwrap(), b"arc-sdk");
/// ```
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Option<Connection>>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and its
    /// `kv_store` table.
    ///
    /// The database is opened through [`Database::open`], so pragmas and
    /// bundled migrations are applied as well.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the table
    /// cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(DatabaseConfig::new(path.as_ref()))
    }

    /// Opens a store with an explicit database configuration.
    ///
    /// # Errors
    ///
    /// See [`SqliteStore::open`].
    pub fn open_with_config(config: DatabaseConfig) -> Result<Self> {
        Self::from_database(Database::open(config)?)
    }

    /// Wraps an already-open database.
    ///
    /// # Errors
    ///
    /// Returns an error if the `kv_store` table cannot be created.
    pub fn from_database(db: Database) -> Result<Self> {
        let conn = db.into_connection();
        conn.execute_batch(CREATE_KV_TABLE)?;
        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    /// Returns when `key` was last written, in nanoseconds since the epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key is absent.
    pub fn updated_at(&self, key: &str) -> Result<i64> {
        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or(Error::StoreClosed)?;
        conn.query_row(
            "SELECT updated_at FROM kv_store WHERE key = ?1",
            [key],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| Error::NotFound {
            key: key.to_string(),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<Connection>>> {
        self.conn.lock().map_err(|_| Error::LockPoisoned)
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or(Error::StoreClosed)?;
        conn.query_row(SELECT_KV_VALUE, [key], |row| {
            // Older databases stored values as TEXT
            match row.get_ref(0)? {
                ValueRef::Blob(bytes) | ValueRef::Text(bytes) => Ok(bytes.to_vec()),
                ValueRef::Null => Ok(Vec::new()),
                other => Err(rusqlite::Error::InvalidColumnType(
                    0,
                    "value".to_string(),
                    other.data_type(),
                )),
            }
        })
        .optional()?
        .ok_or_else(|| Error::NotFound {
            key: key.to_string(),
        })
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or(Error::StoreClosed)?;
        let now = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX);
        conn.execute(UPSERT_KV_VALUE, params![key, value, now])?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let guard = self.lock()?;
        let conn = guard.as_ref().ok_or(Error::StoreClosed)?;
        conn.execute(DELETE_KV_VALUE, [key])?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let slot = self.conn.get_mut().map_err(|_| Error::LockPoisoned)?;
        if let Some(conn) = slot.take() {
            conn.close().map_err(|(_, e)| Error::Database(e))?;
        }
        Ok(())
    }
}
