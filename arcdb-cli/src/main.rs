//! Main entry point for the arcdb CLI.
//!
//! This is the command-line interface for arc's local database.
//! It provides commands for maintaining the database:
//! - `migrate`: Apply pending schema migrations
//! - `migrations`: List bundled migrations and their status
//! - `kv`: Get, set or delete key-value entries
//! - `show-db-path`: Show the resolved database path

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::{load_configuration, GlobalOptions};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        config: cli.config,
    };

    // Initialize logging: flags, then ARC_LOG_MODE or the config file
    let logger = if global.verbose || global.quiet {
        arcdb::init_logger(global.verbose, global.quiet)
    } else {
        load_configuration(&global)
            .ok()
            .and_then(|config| config.log_level())
            .map_or_else(|| arcdb::init_logger(false, false), arcdb::Logger::new)
    };
    logger.install();

    // Execute the command
    let result = match cli.command {
        cli::Command::Migrate(cmd) => cmd.execute(&global),
        cli::Command::Migrations(cmd) => cmd.execute(&global),
        cli::Command::Kv(cmd) => cmd.execute(&global),
        cli::Command::ShowDbPath(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
