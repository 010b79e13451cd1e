//! Key-value storage with durable and ephemeral backends.
//!
//! [`KvStore`] is a uniform get/set/delete/close contract over opaque byte
//! values keyed by string. [`SqliteStore`] persists entries in the embedded
//! database; [`MemoryStore`] keeps them in process memory. Both satisfy the
//! same contract, so callers can try durable storage first and fall back to
//! memory (see [`open_with_fallback`]) without changing any call site.
//!
//! [`get_json`] and [`set_json`] layer JSON encoding on top for structured
//! state.
//!
//! # Examples
//!
//! ```
//! use arcdb::kv::{get_json, set_json, KvStore, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct SyncState {
//!     counter: u32,
//! }
//!
//! let store = MemoryStore::new();
//! set_json(&store, "sync:state", &SyncState { counter: 5 }).unwrap();
//! let state: SyncState = get_json(&store, "sync:state").unwrap();
//! assert_eq!(state, SyncState { counter: 5 });
//!
//! store.delete("sync:state").unwrap();
//! assert!(store.get("sync:state").unwrap_err().is_not_found());
//! ```

mod memory;
mod sqlite;
mod typed;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use typed::{get_json, set_json};

/// A string-keyed store of opaque byte values.
///
/// Implementations must be safe to share between threads.
pub trait KvStore: Send + Sync {
    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key has never been written or has
    /// been deleted, and a backend error if the lookup itself fails.
    fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the write fails.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Removes `key`. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the delete fails.
    fn delete(&self, key: &str) -> Result<()>;

    /// Releases the resources held by the store.
    ///
    /// The store must not be used afterwards.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the resources cannot be released cleanly.
    fn close(&mut self) -> Result<()>;
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get(&self, key: &str) -> Result<Vec<u8>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Which key-value backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KvBackend {
    /// Durable storage in the embedded database.
    #[default]
    Sqlite,
    /// Ephemeral storage in process memory.
    Memory,
}

impl fmt::Display for KvBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for KvBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            _ => Err(Error::Validation {
                field: "kv_backend".into(),
                message: format!("unknown backend '{s}', expected 'sqlite' or 'memory'"),
            }),
        }
    }
}

/// Opens a store of the requested kind.
///
/// `path` is the database file for [`KvBackend::Sqlite`] and is ignored for
/// [`KvBackend::Memory`].
///
/// # Errors
///
/// Returns an error if the durable store cannot be opened.
pub fn open_store(backend: KvBackend, path: impl AsRef<Path>) -> Result<Box<dyn KvStore>> {
    match backend {
        KvBackend::Sqlite => Ok(Box::new(SqliteStore::open(path)?)),
        KvBackend::Memory => Ok(Box::new(MemoryStore::new())),
    }
}

/// Opens a durable store at `path`, falling back to memory on failure.
///
/// The fallback covers read-only filesystems and sandboxed environments
/// where the database cannot be created. The failure is logged as a warning.
///
/// # Examples
///
/// ```
/// use arcdb::kv::{open_with_fallback, KvStore};
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = open_with_fallback(dir.path().join("arc.db"));
/// store.set("greeting", b"hello").unwrap();
/// assert_eq!(store.get("greeting").unwrap(), b"hello");
/// ```
#[must_use]
pub fn open_with_fallback(path: impl AsRef<Path>) -> Box<dyn KvStore> {
    let path = path.as_ref();
    match SqliteStore::open(path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!(
                "persistent store unavailable at {}, using in-memory store: {e}",
                path.display()
            );
            Box::new(MemoryStore::new())
        }
    }
}
