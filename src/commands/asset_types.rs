//! Asset type command handlers.

use clap::Subcommand;
use schema_store::{SchemaStore, StorageBackend};
use std::io::Write;

/// Asset type subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum AssetTypeCommand {
    /// List asset types in alphabetical order
    List,

    /// Register a new asset type
    Add {
        /// Asset type name (unique, compared case-insensitively)
        name: String,
    },
}

/// Run an asset type command.
pub fn run_asset_types<B: StorageBackend>(
    store: &mut SchemaStore<B>,
    command: AssetTypeCommand,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        AssetTypeCommand::List => {
            for name in store.asset_types() {
                writeln!(out, "{name}")?;
            }
        }
        AssetTypeCommand::Add { name } => {
            store.add_asset_type(&name)?;
            writeln!(out, "Asset type '{}' added", name.trim())?;
        }
    }
    Ok(())
}
