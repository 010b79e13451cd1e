//! Database configuration and connection parameters.
//!
//! This module provides configuration types for database connections,
//! including path resolution and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Path that selects a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// Configuration for database connections.
///
/// This struct contains all parameters needed to open and configure
/// a database connection, including the database file path, timeout
/// settings, and access modes.
///
/// # Examples
///
/// ```
/// use arcdb::database::DatabaseConfig;
/// use std::time::Duration;
///
/// // Create a configuration with default settings
/// let config = DatabaseConfig::new("/tmp/arc.db");
///
/// // Customize the configuration
/// let config = DatabaseConfig::new("/tmp/arc.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Busy timeout for database lock contention.
    pub busy_timeout: Duration,
    /// Whether to automatically create the database if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
    /// Whether opening applies pending bundled migrations.
    pub apply_migrations: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    /// - `read_only`: false
    /// - `apply_migrations`: true
    ///
    /// # Examples
    ///
    /// ```
    /// use arcdb::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/arc.db");
    /// assert_eq!(config.path.to_str().unwrap(), "/tmp/arc.db");
    /// ```
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
            apply_migrations: true,
        }
    }

    /// Opens the database without applying pending migrations.
    ///
    /// Useful for status reporting and dry runs; call
    /// [`Database::migrate`](crate::database::Database::migrate) to apply them
    /// later.
    #[must_use]
    pub fn skip_migrations(mut self) -> Self {
        self.apply_migrations = false;
        self
    }

    /// Creates a configuration for a private in-memory database.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcdb::database::DatabaseConfig;
    ///
    /// assert!(DatabaseConfig::in_memory().is_in_memory());
    /// ```
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MEMORY_PATH)
    }

    /// Returns true if this configuration names an in-memory database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == MEMORY_PATH
    }

    /// Sets the busy timeout duration.
    ///
    /// The busy timeout determines how long the database connection will
    /// wait when encountering a locked database before returning an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcdb::database::DatabaseConfig;
    /// use std::time::Duration;
    ///
    /// let config = DatabaseConfig::new("/tmp/arc.db")
    ///     .with_busy_timeout(Duration::from_secs(10));
    /// ```
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Configures the database to be opened in read-only mode.
    ///
    /// When read-only is enabled, `auto_create` is automatically disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcdb::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/arc.db").read_only();
    /// assert!(config.read_only);
    /// assert!(!config.auto_create);
    /// ```
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "arc.db";

/// Returns the default data directory for arc.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/arc`
/// 2. `~/.local/share/arc`
///
/// Returns `None` if neither `XDG_DATA_HOME` nor a home directory is
/// available.
///
/// # Examples
///
/// ```no_run
/// use arcdb::database::default_data_dir;
///
/// if let Some(dir) = default_data_dir() {
///     println!("Data directory: {}", dir.display());
/// }
/// ```
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg).join("arc"));
    }
    home::home_dir()
        .filter(|home| !home.as_os_str().is_empty())
        .map(|home| home.join(".local").join("share").join("arc"))
}

/// Resolves the database path using environment variables or defaults.
///
/// The resolution order is:
/// 1. `$ARC_DATA_DIR/arc.db` if the `ARC_DATA_DIR` environment variable is set
/// 2. `<default data dir>/arc.db` (see [`default_data_dir`])
/// 3. `arc.db` in the current working directory
///
/// # Examples
///
/// ```no_run
/// use arcdb::database::resolve_database_path;
///
/// let db_path = resolve_database_path();
/// println!("Database path: {}", db_path.display());
/// ```
#[must_use]
pub fn resolve_database_path() -> PathBuf {
    if let Some(data_dir) = std::env::var_os("ARC_DATA_DIR").filter(|v| !v.is_empty()) {
        return PathBuf::from(data_dir).join(DATABASE_FILE_NAME);
    }
    default_data_dir().map_or_else(
        || PathBuf::from(DATABASE_FILE_NAME),
        |dir| dir.join(DATABASE_FILE_NAME),
    )
}
