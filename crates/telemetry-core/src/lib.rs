//! Core types for the telemetry-mock framework.
//!
//! This crate provides the foundational types shared by the schema store,
//! the packet generator and the bulk import tooling:
//!
//! - [`DataType`] - The fixed set of value types a data point can declare
//! - [`DataPoint`] - A stored data point schema
//! - [`DataPointDraft`] - A data point as entered by the operator, before an id is assigned
//! - [`SampleValue`] - A synthesized value ready to be placed in a packet
//! - [`Catalog`] - An in-memory snapshot of asset types and data points
//! - [`SchemaSource`] - Read-only lookups consumed by the generation engine
//!
//! # Architecture
//!
//! ```text
//! telemetry-core (this crate)
//!    │
//!    ├─── schema-store      (validated writes + persistence of a Catalog)
//!    ├─── packet-generator  (reads a SchemaSource, produces packets)
//!    └─── datapoint-bulk    (CSV import/export of DataPointDrafts)
//! ```

pub mod catalog;
pub mod error;
pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use catalog::{Catalog, SchemaSource};
pub use error::ValidationError;
pub use schema::{split_list, AssetType, DataPoint, DataPointDraft, DataPointId};
pub use types::DataType;
pub use values::SampleValue;
