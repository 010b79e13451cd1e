//! Key-value command implementation.
//!
//! This module implements the `kv` command family, which reads and writes
//! entries in the key-value store.

use crate::error::CliError;
use crate::utils::{load_configuration, open_kv_store, GlobalOptions};
use arcdb::kv::{KvBackend, KvStore};
use clap::{Args, Subcommand};
use std::io::Write;

/// Read and write key-value entries.
#[derive(Args)]
pub struct KvCommand {
    /// Use the in-memory backend (entries vanish when the command exits)
    #[arg(long, global = true)]
    pub memory: bool,

    #[command(subcommand)]
    pub action: KvAction,
}

/// Key-value operations.
#[derive(Subcommand)]
pub enum KvAction {
    /// Print the value stored under KEY
    Get {
        /// Key to look up
        key: String,
    },

    /// Store VALUE under KEY, replacing any previous value
    Set {
        /// Key to write
        key: String,
        /// Value to store
        value: String,
    },

    /// Remove KEY (absent keys are not an error)
    Delete {
        /// Key to remove
        key: String,
    },
}

impl KvCommand {
    /// Execute the kv command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;

        // 2. Open the selected backend
        let backend = if self.memory {
            KvBackend::Memory
        } else {
            config.kv_backend()
        };
        let mut store = open_kv_store(&config, backend)?;

        // 3. Run the operation, then release the store either way
        let result = run_action(store.as_ref(), self.action, global);
        let closed = store.close();
        result?;
        closed.map_err(CliError::from)
    }
}

fn run_action(store: &dyn KvStore, action: KvAction, global: &GlobalOptions) -> Result<(), CliError> {
    match action {
        KvAction::Get { key } => {
            let value = store.get(&key)?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(&value)?;
            writeln!(handle)?;
        }
        KvAction::Set { key, value } => {
            if key.is_empty() {
                return Err(CliError::InvalidArguments("key must not be empty".into()));
            }
            store.set(&key, value.as_bytes())?;
            if !global.quiet {
                eprintln!("Set {key}");
            }
        }
        KvAction::Delete { key } => {
            store.delete(&key)?;
            if !global.quiet {
                eprintln!("Deleted {key}");
            }
        }
    }

    Ok(())
}
