//! Configuration system for arc.
//!
//! This module provides configuration with support for:
//! - YAML configuration files (explicit, project-local and global)
//! - Environment variable overrides
//! - `~` and `$VAR` expansion in paths
//!
//! # Configuration Precedence
//!
//! The first existing file is used (highest to lowest):
//!
//! 1. Explicit path (e.g. `--config`)
//! 2. `$ARC_CONFIG`
//! 3. `.arc/config.yaml` in the working directory or an ancestor
//! 4. `$XDG_CONFIG_HOME/arc/config.yaml` (or `~/.config/arc/config.yaml`)
//!
//! Environment variables (`ARC_*`) are then applied on top, and anything
//! still unset falls back to built-in defaults.
//!
//! # Examples
//!
//! ```
//! use arcdb::config::Config;
//! use arcdb::kv::KvBackend;
//!
//! let config: Config = serde_yaml::from_str(
//!     "database_path: /tmp/arc/arc.db\nkv_backend: sqlite\n",
//! )
//! .unwrap();
//!
//! assert_eq!(config.kv_backend(), KvBackend::Sqlite);
//! assert_eq!(
//!     config.database_config().path,
//!     std::path::PathBuf::from("/tmp/arc/arc.db")
//! );
//! ```

pub mod environment;
pub mod loader;
pub mod schema;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use environment::EnvironmentConfig;
pub use loader::{expand_path, ConfigLoader};
pub use schema::{Config, DEFAULT_BUSY_TIMEOUT_MS};
