//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the CLI reads; cleared so the host cannot leak in.
const ARC_ENV_VARS: [&str; 7] = [
    "ARC_CONFIG",
    "ARC_DATA_DIR",
    "ARC_BUSY_TIMEOUT",
    "ARC_BUSY_TIMEOUT_MS",
    "ARC_KV_BACKEND",
    "ARC_LOG_MODE",
    "XDG_DATA_HOME",
];

/// Test environment with isolated data directory.
///
/// This struct provides an isolated test environment with:
/// - A temporary directory for test files (also the working directory)
/// - A separate data directory for the arc database
/// - Helper methods for common CLI operations
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the arc data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; the CLI creates it on demand.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("arc-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// The command runs in the temporary directory with every `ARC_*`
    /// variable removed and the global config location pointed inside the
    /// temporary directory.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("arcdb").expect("Failed to find arcdb binary");
        for var in ARC_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.env("XDG_CONFIG_HOME", self.temp_path.join("xdg-config"));
        cmd.current_dir(&self.temp_path);
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the database inside the data directory.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("arc.db")
    }

    /// Write a file under the temporary directory, creating parents.
    pub fn write_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Run `arcdb kv set KEY VALUE`.
    pub fn kv_set(&self, key: &str, value: &str) {
        self.command()
            .args(["kv", "set", key, value])
            .assert()
            .success();
    }

    /// Run `arcdb kv get KEY` and return stdout.
    ///
    /// # Panics
    /// Panics if the command fails.
    pub fn kv_get(&self, key: &str) -> String {
        let output = self
            .command()
            .args(["kv", "get", key])
            .output()
            .expect("Failed to run kv get");

        assert!(
            output.status.success(),
            "kv get failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Versions recorded in the test database's tracking table.
    pub fn recorded_versions(&self) -> Vec<u32> {
        let conn = rusqlite::Connection::open(self.db_path()).expect("Failed to open database");
        let mut stmt = conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")
            .expect("Failed to prepare query");
        let versions = stmt
            .query_map([], |row| row.get(0))
            .expect("Failed to query versions")
            .collect::<Result<Vec<u32>, _>>()
            .expect("Failed to read versions");
        versions
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
