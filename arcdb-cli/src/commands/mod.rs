//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `migrate`: Apply pending schema migrations
//! - `migrations`: List bundled migrations and their status
//! - `kv`: Get, set or delete key-value entries
//! - `show_db_path`: Show the resolved database path
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod kv;
pub mod migrate;
pub mod migrations;
pub mod show_db_path;

pub use completions::CompletionsCommand;
pub use kv::KvCommand;
pub use migrate::MigrateCommand;
pub use migrations::MigrationsCommand;
pub use show_db_path::ShowDbPathCommand;
