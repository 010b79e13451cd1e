//! Configuration schema definitions.
//!
//! This module defines the configuration file structure for arc's storage
//! layer: where the database lives, how long to wait on locks, which
//! key-value backend to use and how chatty logging should be.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::database::{resolve_database_path, DatabaseConfig};
use crate::error::{Error, Result};
use crate::kv::KvBackend;
use crate::logging::LogLevel;

/// Busy timeout used when none is configured, in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Complete configuration structure.
///
/// Every field is optional; unset fields fall back to built-in defaults
/// when the configuration is used.
///
/// # Examples
///
/// ```
/// use arcdb::config::Config;
/// use arcdb::kv::KvBackend;
///
/// let config: Config = serde_yaml::from_str("kv_backend: memory\n").unwrap();
/// assert_eq!(config.kv_backend(), KvBackend::Memory);
/// assert_eq!(config.busy_timeout_ms, None);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the database file.
    pub database_path: Option<PathBuf>,

    /// Busy timeout for lock contention (milliseconds).
    pub busy_timeout_ms: Option<u64>,

    /// Key-value backend selection.
    pub kv_backend: Option<KvBackend>,

    /// Log mode: `quiet`, `normal` or `verbose`.
    pub log_mode: Option<String>,
}

impl Config {
    /// Returns the database path, resolving the default when unset.
    ///
    /// See [`resolve_database_path`] for the default resolution order.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(resolve_database_path)
    }

    /// Returns the busy timeout, defaulting to five seconds.
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS))
    }

    /// Returns the configured key-value backend.
    #[must_use]
    pub fn kv_backend(&self) -> KvBackend {
        self.kv_backend.unwrap_or_default()
    }

    /// Returns the configured log level, if any.
    #[must_use]
    pub fn log_level(&self) -> Option<LogLevel> {
        self.log_mode
            .as_deref()
            .and_then(|mode| LogLevel::parse(mode).ok())
    }

    /// Checks values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `log_mode` is not a known level.
    pub fn validate(&self) -> Result<()> {
        if let Some(mode) = &self.log_mode {
            LogLevel::parse(mode).map_err(|message| Error::Validation {
                field: "log_mode".into(),
                message,
            })?;
        }
        Ok(())
    }

    /// Builds a [`DatabaseConfig`] from the resolved values.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcdb::config::Config;
    /// use std::path::PathBuf;
    /// use std::time::Duration;
    ///
    /// let config = Config {
    ///     database_path: Some(PathBuf::from("/tmp/arc/arc.db")),
    ///     busy_timeout_ms: Some(250),
    ///     ..Default::default()
    /// };
    /// let db_config = config.database_config();
    /// assert_eq!(db_config.path, PathBuf::from("/tmp/arc/arc.db"));
    /// assert_eq!(db_config.busy_timeout, Duration::from_millis(250));
    /// ```
    #[must_use]
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_path()).with_busy_timeout(self.busy_timeout())
    }
}
