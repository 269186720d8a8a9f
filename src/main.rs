//! Command-line interface for telemetry-mock
//!
//! # Usage Examples
//!
//! ## Schema
//! ```bash
//! # Register an asset type and a data point
//! telemetry-mock asset-types add Chiller
//! telemetry-mock data-points add --name "Fuel Level" --identifiers fuel \
//!   --asset-types DG --data-type int --range-min 0 --range-max 100
//!
//! # Bulk edit through CSV
//! telemetry-mock data-points template points.csv
//! telemetry-mock data-points import points.csv
//! ```
//!
//! ## Generation
//! ```bash
//! # Envelope packets for one PLD
//! telemetry-mock generate single --asset-type DG --pld PLD-100 --frequency 30
//!
//! # Flat packets for several PLDs from a plan file
//! telemetry-mock generate multi --plan plan.yaml --seed 7
//! ```
//!
//! The store file defaults to `data_points.json` and can be moved with
//! `--store` or `TELEMETRY_MOCK_STORE`.

use clap::{Parser, Subcommand};
use telemetry_mock::commands::{
    run_asset_types, run_data_points, run_generate, AssetTypeCommand, DataPointCommand,
    GenerateCommand,
};
use telemetry_mock::StoreOpts;

#[derive(Parser)]
#[command(name = "telemetry-mock")]
#[command(about = "Generate mock IoT telemetry packets from data point schemas")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    store: StoreOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage asset types
    AssetTypes {
        #[command(subcommand)]
        command: AssetTypeCommand,
    },

    /// Manage data point definitions
    DataPoints {
        #[command(subcommand)]
        command: DataPointCommand,
    },

    /// Generate packets into a JSON file
    Generate {
        #[command(subcommand)]
        command: GenerateCommand,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut store = cli.store.open()?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::AssetTypes { command } => run_asset_types(&mut store, command, &mut stdout)?,
        Commands::DataPoints { command } => run_data_points(&mut store, command, &mut stdout)?,
        Commands::Generate { command } => {
            run_generate(store.catalog(), command, &mut stdout)?;
        }
    }
    Ok(())
}
