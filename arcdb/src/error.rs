//! Error types for the arcdb library.
//!
//! This module provides the error hierarchy shared by the migration runner,
//! the database bootstrap code and the key-value stores, using `thiserror`
//! for ergonomic error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with an arcdb error.
///
/// # Examples
///
/// ```
/// use arcdb::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the arcdb library.
#[derive(Debug, Error)]
pub enum Error {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A connection pragma could not be applied.
    #[error("failed to set pragma {pragma}: {message}")]
    Pragma {
        /// The pragma that failed.
        pragma: &'static str,
        /// What went wrong.
        message: String,
    },

    /// The migration tracking table could not be created or read.
    #[error("migration bookkeeping failed: {source}")]
    Bookkeeping {
        /// The underlying database error.
        #[source]
        source: rusqlite::Error,
    },

    /// A migration script failed and was rolled back.
    #[error("apply migration {version:03}_{name}: {source}")]
    Migration {
        /// Version of the failing script.
        version: u32,
        /// Name of the failing script.
        name: String,
        /// The underlying database error.
        #[source]
        source: rusqlite::Error,
    },

    /// Two bundled migration scripts claim the same version.
    #[error("duplicate migration version {version}: '{first}' and '{second}'")]
    DuplicateMigrationVersion {
        /// The contested version.
        version: u32,
        /// File name of the first script seen.
        first: String,
        /// File name of the second script seen.
        second: String,
    },

    /// The requested key does not exist in the store.
    #[error("key not found: {key}")]
    NotFound {
        /// The missing key.
        key: String,
    },

    /// A stored value could not be decoded as the requested type.
    #[error("failed to decode value for key '{key}': {source}")]
    Decode {
        /// The key whose value is corrupt.
        key: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded for storage.
    #[error("failed to encode value for key '{key}': {source}")]
    Encode {
        /// The key being written.
        key: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A store lock was poisoned by a panicking thread.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// The store was used after `close`.
    #[error("store is closed")]
    StoreClosed,
}

impl Error {
    /// Check if error indicates a missing key.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcdb::Error;
    ///
    /// let err = Error::NotFound { key: "session:last".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error indicates a stored value that failed to decode.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Check if error was caused by database lock contention.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        let sqlite_err = match self {
            Self::Database(e) | Self::Bookkeeping { source: e } => e,
            Self::Migration { source, .. } => source,
            _ => return false,
        };
        matches!(
            sqlite_err.sqlite_error_code(),
            Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
        )
    }
}
