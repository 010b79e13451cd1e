//! Database connection management.
//!
//! This module provides the main database connection type. Opening a
//! database applies the connection pragmas and then the bundled migrations,
//! so callers always receive a handle whose schema is current.

use rusqlite::{Connection, OpenFlags};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;
use super::migrations::Migrator;

/// Page cache size in KiB (negative values are KiB in `SQLite`).
const CACHE_SIZE_KIB: i64 = -64_000;

/// A database connection wrapper with configuration.
///
/// # Examples
///
/// ```no_run
/// use arcdb::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/arc.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if `auto_create` is enabled
    /// - Open the database with appropriate flags
    /// - Set WAL mode (file databases only) and the remaining pragmas
    /// - Apply pending bundled migrations unless disabled or read-only
    ///
    /// On any failure the connection is dropped before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file cannot be opened
    /// - The parent directory cannot be created
    /// - PRAGMA settings cannot be applied
    /// - A migration fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use arcdb::database::{Database, DatabaseConfig};
    ///
    /// let config = DatabaseConfig::new("/tmp/arc.db");
    /// let db = Database::open(config).unwrap();
    /// ```
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        let in_memory = config.is_in_memory();

        if config.auto_create && !in_memory && !config.path.exists() {
            if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = if in_memory {
            Connection::open_in_memory_with_flags(flags)?
        } else {
            Connection::open_with_flags(&config.path, flags)?
        };

        apply_pragmas(&conn, &config)?;

        let mut db = Self { conn, config };
        if db.config.apply_migrations && !db.config.read_only {
            db.migrate()?;
        }

        log::debug!("opened database at {}", db.config.path.display());
        Ok(db)
    }

    /// Opens a private, migrated in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the pragmas or migrations fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcdb::database::Database;
    ///
    /// let db = Database::open_in_memory().unwrap();
    /// ```
    pub fn open_in_memory() -> Result<Self> {
        Self::open(DatabaseConfig::in_memory())
    }

    /// Applies pending bundled migrations and returns how many ran.
    ///
    /// # Errors
    ///
    /// See [`Migrator::apply`].
    pub fn migrate(&mut self) -> Result<usize> {
        Migrator::bundled()?.apply(&mut self.conn)
    }

    /// Returns the configuration this database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns a reference to the underlying `SQLite` connection.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcdb::database::Database;
    ///
    /// let db = Database::open_in_memory().unwrap();
    /// let conn = db.connection();
    /// ```
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying `SQLite` connection.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Consumes the wrapper and returns the underlying connection.
    #[must_use]
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

fn apply_pragmas(conn: &Connection, config: &DatabaseConfig) -> Result<()> {
    if !config.read_only && !config.is_in_memory() {
        // PRAGMA journal_mode returns the resulting mode
        let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        if !mode.eq_ignore_ascii_case("wal") {
            return Err(Error::Pragma {
                pragma: "journal_mode",
                message: format!("expected wal, got {mode}"),
            });
        }
    }

    conn.execute_batch("PRAGMA synchronous = NORMAL")?;
    conn.execute_batch("PRAGMA foreign_keys = ON")?;
    conn.busy_timeout(config.busy_timeout)?;
    conn.execute_batch(&format!("PRAGMA cache_size = {CACHE_SIZE_KIB}"))?;
    conn.execute_batch("PRAGMA temp_store = MEMORY")?;
    Ok(())
}
