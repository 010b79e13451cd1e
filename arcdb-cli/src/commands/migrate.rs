//! Migrate command implementation.
//!
//! This module implements the `migrate` command, which applies every
//! bundled schema migration not yet recorded in the database.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database_for_status, shorten_path, GlobalOptions};
use arcdb::database::{embedded_migrations, pending_migrations, Database, MigrationInfo};
use clap::Args;

/// Apply pending schema migrations.
#[derive(Args)]
pub struct MigrateCommand {
    /// List pending migrations without applying them
    #[arg(long)]
    pub dry_run: bool,
}

impl MigrateCommand {
    /// Execute the migrate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;
        let db_path = config.database_path();

        // 2. Work out what is pending
        let pending: Vec<MigrationInfo> = match open_database_for_status(&config)? {
            Some(db) => pending_migrations(db.connection())?,
            None => embedded_migrations()?,
        };

        if self.dry_run {
            for migration in &pending {
                println!("{:03}_{}", migration.version, migration.name);
            }
            if !global.quiet {
                eprintln!(
                    "{} pending migration(s) for {}",
                    pending.len(),
                    shorten_path(&db_path)
                );
                eprintln!("Dry run - no changes made.");
            }
            return Ok(());
        }

        // 3. Open (creating if needed) and apply
        let mut db_config = config.database_config();
        db_config.apply_migrations = false;
        let mut db = Database::open(db_config)?;
        let applied = db.migrate()?;

        // Output the applied scripts to stdout for scripting
        for migration in pending.iter().take(applied) {
            println!("{:03}_{}", migration.version, migration.name);
        }

        if !global.quiet {
            if applied == 0 {
                eprintln!("Database is up to date.");
            } else {
                eprintln!(
                    "Applied {applied} migration(s) to {}",
                    shorten_path(&db_path)
                );
            }
        }

        Ok(())
    }
}
