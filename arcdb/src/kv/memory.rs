//! In-process key-value store.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{Error, Result};

use super::KvStore;

/// A [`KvStore`] held in process memory.
///
/// Entries are guarded by a single reader/writer lock: `get` takes the read
/// lock, `set` and `delete` the write lock. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if a writer panicked.
    pub fn len(&self) -> Result<usize> {
        Ok(self.data.read().map_err(|_| Error::LockPoisoned)?.len())
    }

    /// Returns true if the store holds no entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if a writer panicked.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let data = self.data.read().map_err(|_| Error::LockPoisoned)?;
        data.get(key).cloned().ok_or_else(|| Error::NotFound {
            key: key.to_string(),
        })
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut data = self.data.write().map_err(|_| Error::LockPoisoned)?;
        data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut data = self.data.write().map_err(|_| Error::LockPoisoned)?;
        data.remove(key);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let data = self.data.get_mut().map_err(|_| Error::LockPoisoned)?;
        *data = HashMap::new();
        Ok(())
    }
}
