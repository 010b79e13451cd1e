//! Common test utilities for integration tests.
//!
//! This module provides helper functions for testing the arcdb library.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use arcdb::database::{Database, DatabaseConfig};

/// Creates a test database in a temporary location.
///
/// The temporary directory is leaked so the database outlives this call.
#[allow(dead_code)]
pub fn create_test_database() -> (PathBuf, Database) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arc.db");
    let db = Database::open(DatabaseConfig::new(&path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    (path, db)
}

/// Writes `contents` to `dir/relative`, creating parent directories.
#[allow(dead_code)]
pub fn write_file(dir: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// RAII guard for setting and restoring environment variables.
///
/// Tests using it must be marked `#[serial]`.
#[allow(dead_code)]
pub struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    /// Sets `key` to `value` until the guard is dropped.
    pub fn new(key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    /// Removes `key` until the guard is dropped.
    pub fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

/// Clears every `ARC_*` variable the library reads.
#[allow(dead_code)]
pub fn clear_arc_env_vars() -> Vec<EnvGuard> {
    [
        "ARC_CONFIG",
        "ARC_DATA_DIR",
        "ARC_BUSY_TIMEOUT_MS",
        "ARC_KV_BACKEND",
        "ARC_LOG_MODE",
    ]
    .into_iter()
    .map(EnvGuard::remove)
    .collect()
}
