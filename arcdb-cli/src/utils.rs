//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management and output
//! formatting.

use crate::error::CliError;
use arcdb::database::DATABASE_FILE_NAME;
use arcdb::kv::{KvBackend, KvStore, MemoryStore, SqliteStore};
use arcdb::{Config, ConfigLoader, Database};
use std::env;
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

/// Load configuration.
///
/// Configuration is resolved from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. The first configuration file found
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let working_dir = env::current_dir()?;
    let mut config = ConfigLoader::load(global.config.as_deref(), &working_dir).map_err(|e| {
        match e {
            arcdb::Error::Io(io) => CliError::Config(format!("cannot read configuration: {io}")),
            other => CliError::Config(other.to_string()),
        }
    })?;

    if let Some(ref data_dir) = global.data_dir {
        config.database_path = Some(data_dir.join(DATABASE_FILE_NAME));
    }
    if let Some(seconds) = global.busy_timeout {
        config.busy_timeout_ms = Some(u64::from(seconds) * 1000);
    }

    Ok(config)
}

/// Open the database, applying any pending migrations.
pub fn open_database(config: &Config) -> Result<Database, CliError> {
    Database::open(config.database_config()).map_err(CliError::from)
}

/// Open an existing database without migrating it.
///
/// Returns `None` when the database file does not exist yet.
pub fn open_database_for_status(config: &Config) -> Result<Option<Database>, CliError> {
    let db_config = config.database_config().skip_migrations();
    if !db_config.path.exists() {
        return Ok(None);
    }
    Database::open(db_config).map(Some).map_err(CliError::from)
}

/// Open the key-value store for the given backend.
pub fn open_kv_store(config: &Config, backend: KvBackend) -> Result<Box<dyn KvStore>, CliError> {
    match backend {
        KvBackend::Sqlite => {
            let store = SqliteStore::open_with_config(config.database_config())?;
            Ok(Box::new(store))
        }
        KvBackend::Memory => Ok(Box::new(MemoryStore::new())),
    }
}

/// Format a stored `applied_at` timestamp for display.
pub fn format_timestamp(ts: chrono::NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
