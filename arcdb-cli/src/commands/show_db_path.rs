//! Command to show the resolved database path.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;

/// Show the resolved database path.
#[derive(Args)]
pub struct ShowDbPathCommand {}

impl ShowDbPathCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Resolve the path using same logic as other commands
        let config = load_configuration(global)?;

        println!("{}", config.database_path().display());
        Ok(())
    }
}
