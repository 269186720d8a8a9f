//! telemetry-mock library
//!
//! Generates mock IoT telemetry packets from operator-defined data point
//! schemas.
//!
//! # Features
//!
//! - Schema store: asset types and data points with write-time validation
//! - Bulk import/export of data points as CSV
//! - Single-source generation: envelope packets for one asset type and PLD
//! - Multi-source generation: flat packets for many asset types and PLDs,
//!   merged into one time-ordered stream
//!
//! # CLI Usage
//!
//! ```bash
//! # Define a data point
//! telemetry-mock data-points add --name "Supply Temp" --identifiers sup_t \
//!   --asset-types HVAC --data-type float --range-min 12 --range-max 18
//!
//! # One day of HVAC packets every 15 minutes
//! telemetry-mock generate single --asset-type HVAC --pld PLD-001 \
//!   --start-date 2024-01-01 --end-date 2024-01-01 --frequency 15
//!
//! # Several asset types merged by timestamp
//! telemetry-mock generate multi --start-date 2024-01-01 --end-date 2024-01-02 \
//!   --source "HVAC=PLD-1,PLD-2" --frequency "HVAC=15" --source "DG=PLD-9"
//! ```

use clap::Parser;
use schema_store::{FilesystemBackend, SchemaStore};
use std::path::PathBuf;

pub mod commands;
pub mod config;

/// Default location of the schema store file.
pub const DEFAULT_STORE_PATH: &str = "data_points.json";

#[derive(Parser, Clone, Debug)]
pub struct StoreOpts {
    /// Path of the JSON file holding asset types and data points
    #[arg(
        long = "store",
        global = true,
        default_value = DEFAULT_STORE_PATH,
        env = "TELEMETRY_MOCK_STORE"
    )]
    pub store_path: PathBuf,
}

impl StoreOpts {
    /// Open the file-backed schema store, creating it on first use.
    pub fn open(&self) -> anyhow::Result<SchemaStore<FilesystemBackend>> {
        use anyhow::Context;

        SchemaStore::open(FilesystemBackend::new(&self.store_path))
            .with_context(|| format!("Failed to open schema store {:?}", self.store_path))
    }
}
