//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, KvCommand, MigrateCommand, MigrationsCommand, ShowDbPathCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting and maintaining arc's local database.
#[derive(Parser)]
#[command(name = "arcdb")]
#[command(version, about = "Inspect and maintain arc's local database", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "ARC_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "ARC_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Use this configuration file
    #[arg(long, value_name = "PATH", global = true, env = "ARC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Apply pending schema migrations
    Migrate(MigrateCommand),

    /// List bundled migrations and their status
    Migrations(MigrationsCommand),

    /// Read and write key-value entries
    Kv(KvCommand),

    /// Show the resolved database path
    ShowDbPath(ShowDbPathCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
