//! CSV bulk import and export of data points.
//!
//! A bulk file has one data point per row with the columns
//! `name, identifiers, asset_types, data_type, range_min, range_max,
//! string_options`. List cells are comma-separated.
//!
//! # Example
//!
//! ```ignore
//! use datapoint_bulk::import_data_points;
//! use schema_store::{FilesystemBackend, SchemaStore};
//!
//! let mut store = SchemaStore::open(FilesystemBackend::new("data_points.json"))?;
//! let summary = import_data_points(std::fs::File::open("points.csv")?, &mut store)?;
//! println!("{} added, {} updated", summary.added, summary.updated);
//! ```
//!
//! An upload is validated in full before anything is written. If any row
//! fails, [`BulkError::Rejected`] carries every problem found and the store
//! is left as it was.

mod error;
mod export;
mod import;
pub mod record;

pub use error::{BulkError, RowError};
pub use export::{write_export, write_template};
pub use import::{import_data_points, read_records, validate_records, ImportSummary};
pub use record::BulkRecord;
