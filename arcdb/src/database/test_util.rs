//! Shared test utilities for database unit tests.

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};

/// Creates a migrated, file-backed test database that lives for the rest of
/// the test process.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}
