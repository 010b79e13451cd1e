//! JSON adapters over [`KvStore`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

use super::KvStore;

/// Reads the value under `key` and decodes it as JSON.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the key is absent ("no state yet") and
/// [`Error::Decode`] if the stored bytes are not valid JSON for `T`
/// ("corrupt state"), plus whatever the store's `get` signals.
pub fn get_json<T, S>(store: &S, key: &str) -> Result<T>
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    let data = store.get(key)?;
    serde_json::from_slice(&data).map_err(|source| Error::Decode {
        key: key.to_string(),
        source,
    })
}

/// Encodes `value` as JSON and stores it under `key`.
///
/// # Errors
///
/// Returns [`Error::Encode`] if `value` cannot be serialized, plus whatever
/// the store's `set` signals.
pub fn set_json<T, S>(store: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let data = serde_json::to_vec(value).map_err(|source| Error::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &data)
}
