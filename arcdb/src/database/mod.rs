//! Database layer: connection bootstrap and schema migrations.
//!
//! Opening a [`Database`] creates the parent directory, tunes the
//! connection pragmas and applies every pending bundled migration. Callers
//! then use the connection directly or wrap it in a key-value store.
//!
//! # Examples
//!
//! ```no_run
//! use arcdb::database::{Database, DatabaseConfig, resolve_database_path};
//! use arcdb::database::migrations::applied_migrations;
//!
//! let db = Database::open(DatabaseConfig::new(resolve_database_path())).unwrap();
//! for migration in applied_migrations(db.connection()).unwrap() {
//!     println!("{:03} {}", migration.version, migration.name);
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
pub(crate) mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export public API
pub use config::{
    default_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME, MEMORY_PATH,
};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{
    applied_migrations, embedded_migrations, pending_migrations, run_migrations,
    AppliedMigration, MigrationInfo, MigrationScript, Migrator,
};
