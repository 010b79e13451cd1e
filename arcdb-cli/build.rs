//! Build script for arcdb-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("arcdb")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and maintain arc's local database")
        .long_about(
            "Command-line tool for applying schema migrations and reading or writing \
             key-value state in arc's local database",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("ARC_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("ARC_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Use this configuration file")
                .value_name("PATH")
                .global(true)
                .env("ARC_CONFIG"),
        )
        .subcommands(vec![
            Command::new("migrate")
                .about("Apply pending schema migrations")
                .long_about("Open the database and apply every bundled migration not yet recorded"),
            Command::new("migrations")
                .about("List bundled migrations and their status")
                .long_about("Show every bundled migration script and whether it has been applied"),
            Command::new("kv")
                .about("Read and write key-value entries")
                .long_about("Get, set or delete entries in the key-value store"),
            Command::new("show-db-path")
                .about("Show the resolved database path"),
            Command::new("completions")
                .about("Generate shell completion scripts"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    // Generate main arcdb.1 man page
    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("arcdb.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
