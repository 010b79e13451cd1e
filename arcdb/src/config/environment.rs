//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `ARC_*` environment variables that
//! override configuration file values.

use crate::config::loader::expand_path;
use crate::config::schema::Config;
use crate::database::DATABASE_FILE_NAME;
use crate::error::{Error, Result};
use crate::kv::KvBackend;
use crate::logging::{LogLevel, LOG_MODE_ENV};
use std::env;

/// Directory holding the database; the database file is `<dir>/arc.db`.
pub const DATA_DIR_ENV: &str = "ARC_DATA_DIR";

/// Busy timeout in milliseconds.
pub const BUSY_TIMEOUT_ENV: &str = "ARC_BUSY_TIMEOUT_MS";

/// Key-value backend: `sqlite` or `memory`.
pub const KV_BACKEND_ENV: &str = "ARC_KV_BACKEND";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use arcdb::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Reads the `ARC_*` environment variables and applies them with higher
    /// precedence than file-based configuration. Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if any environment variable value is
    /// invalid (e.g., non-numeric timeout, unknown backend).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        // ARC_DATA_DIR
        if let Some(dir) = Self::var(DATA_DIR_ENV) {
            config.database_path = Some(expand_path(&dir).join(DATABASE_FILE_NAME));
        }

        // ARC_BUSY_TIMEOUT_MS
        if let Some(ms) = Self::var(BUSY_TIMEOUT_ENV) {
            config.busy_timeout_ms = Some(Self::parse_millis(BUSY_TIMEOUT_ENV, &ms)?);
        }

        // ARC_KV_BACKEND
        if let Some(backend) = Self::var(KV_BACKEND_ENV) {
            let backend: KvBackend = backend.parse().map_err(|_| Error::Validation {
                field: KV_BACKEND_ENV.into(),
                message: format!("Invalid backend: '{backend}' (expected sqlite/memory)"),
            })?;
            config.kv_backend = Some(backend);
        }

        // ARC_LOG_MODE
        if let Some(mode) = Self::var(LOG_MODE_ENV) {
            LogLevel::parse(&mode).map_err(|message| Error::Validation {
                field: LOG_MODE_ENV.into(),
                message,
            })?;
            config.log_mode = Some(mode);
        }

        Ok(())
    }

    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Parse a non-negative millisecond count.
    fn parse_millis(field: &str, s: &str) -> Result<u64> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Invalid duration: '{s}' (expected milliseconds)"),
        })
    }
}
