//! Command handlers.
//!
//! Each handler writes its user-facing output to the given writer and
//! returns an error for anything that should end the process with a
//! non-zero status.

pub mod asset_types;
pub mod data_points;
pub mod generate;

pub use asset_types::{run_asset_types, AssetTypeCommand};
pub use data_points::{run_data_points, DataPointCommand, DataPointFields};
pub use generate::{run_generate, write_packets, GenerateCommand, MultiArgs, OutputOpts, SingleArgs};
