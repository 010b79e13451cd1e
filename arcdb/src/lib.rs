#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # arcdb
//!
//! Embedded storage for the arc toolchain.
//!
//! This library owns arc's on-disk state: a `SQLite` database whose schema is
//! evolved by versioned migration scripts bundled into the binary, and a
//! small key-value abstraction with durable and in-memory backends.
//!
//! ## Core Types
//!
//! - [`Database`] and [`DatabaseConfig`]: Connection bootstrap with pragmas
//!   and automatic migration
//! - [`Migrator`]: Discovery and ordered, transactional application of
//!   migration scripts
//! - [`KvStore`], [`SqliteStore`] and [`MemoryStore`]: Key-value storage
//! - [`Config`] and [`ConfigLoader`]: Configuration files and overrides
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use arcdb::{get_json, set_json, Database, KvStore, SqliteStore};
//!
//! // Open an in-memory database; bundled migrations are applied on open
//! let db = Database::open_in_memory().unwrap();
//!
//! // Share it with the key-value store
//! let store = SqliteStore::from_database(db).unwrap();
//! set_json(&store, "sync:counter", &5u32).unwrap();
//! let counter: u32 = get_json(&store, "sync:counter").unwrap();
//! assert_eq!(counter, 5);
//!
//! store.delete("sync:counter").unwrap();
//! assert!(store.get("sync:counter").unwrap_err().is_not_found());
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod kv;
pub mod logging;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigLoader};
pub use database::{run_migrations, Database, DatabaseConfig, Migrator};
pub use error::{Error, Result};
pub use kv::{
    get_json, open_with_fallback, set_json, KvBackend, KvStore, MemoryStore, SqliteStore,
};
pub use logging::{init_logger, LogLevel, Logger};
