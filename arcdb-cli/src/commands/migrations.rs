//! Migrations command implementation.
//!
//! This module implements the `migrations` command, which lists the bundled
//! migration scripts and whether each one has been applied, in various
//! formats (table, JSON, YAML).

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_database_for_status, GlobalOptions};
use arcdb::database::{applied_migrations, embedded_migrations, AppliedMigration};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

/// List bundled migrations and their status.
#[derive(Args)]
pub struct MigrationsCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,

    /// Show only migrations recorded in the database
    #[arg(long)]
    pub applied: bool,
}

/// Output format for the migrations command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// One line of output.
#[derive(Debug, Serialize)]
struct MigrationRow {
    version: u32,
    name: String,
    applied: bool,
    applied_at: Option<String>,
}

impl MigrationsCommand {
    /// Execute the migrations command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;

        // 2. Read recorded migrations without applying anything
        let recorded: Vec<AppliedMigration> = match open_database_for_status(&config)? {
            Some(db) => applied_migrations(db.connection())?,
            None => Vec::new(),
        };

        // 3. Build rows
        let rows: Vec<MigrationRow> = if self.applied {
            recorded.into_iter().map(row_from_applied).collect()
        } else {
            let by_version: HashMap<u32, AppliedMigration> =
                recorded.into_iter().map(|m| (m.version, m)).collect();
            embedded_migrations()?
                .into_iter()
                .map(|info| {
                    let applied = by_version.get(&info.version);
                    MigrationRow {
                        version: info.version,
                        name: info.name,
                        applied: applied.is_some(),
                        applied_at: applied
                            .and_then(|m| m.applied_at)
                            .map(format_timestamp),
                    }
                })
                .collect()
        };

        // 4. Format and output to stdout
        match self.format {
            OutputFormat::Table => format_as_table(&rows)?,
            OutputFormat::Json => format_as_json(&rows)?,
            OutputFormat::Yaml => format_as_yaml(&rows)?,
        }

        Ok(())
    }
}

fn row_from_applied(migration: AppliedMigration) -> MigrationRow {
    MigrationRow {
        version: migration.version,
        name: migration.name,
        applied: true,
        applied_at: migration.applied_at.map(format_timestamp),
    }
}

/// Format migrations as a human-readable table.
fn format_as_table(rows: &[MigrationRow]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "VERSION\tNAME\tSTATUS\tAPPLIED_AT")?;
    for row in rows {
        writeln!(
            handle,
            "{:03}\t{}\t{}\t{}",
            row.version,
            row.name,
            if row.applied { "applied" } else { "pending" },
            row.applied_at.as_deref().unwrap_or("-"),
        )?;
    }

    Ok(())
}

/// Format migrations as JSON.
fn format_as_json(rows: &[MigrationRow]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    serde_json::to_writer_pretty(&mut handle, rows)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    writeln!(handle)?;

    Ok(())
}

/// Format migrations as YAML.
fn format_as_yaml(rows: &[MigrationRow]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    serde_yaml::to_writer(&mut handle, rows)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    Ok(())
}
