//! Mock telemetry packet generator.
//!
//! This crate turns data point schemas into time-stamped telemetry packets.
//! Values are drawn from a seeded RNG, so a fixed seed reproduces a run
//! exactly; timestamps depend only on the requested window and frequency.
//!
//! # Architecture
//!
//! ```text
//! SchemaSource (Catalog snapshot)
//!        │
//!        ▼
//! ┌──────────────────────┐     ┌───────────────────────┐
//! │  generators          │     │  sequencer            │
//! │  (one value per DP)  │     │  (fixed / even ticks) │
//! └──────────┬───────────┘     └───────────┬───────────┘
//!            └──────────────┬──────────────┘
//!                           ▼
//!                   ┌───────────────┐
//!                   │   assembler   │  EnvelopePacket / FlatPacket
//!                   └───────┬───────┘
//!                           ▼
//!                   ┌───────────────┐
//!                   │     merge     │  multi-source, ordered by timestamp
//!                   └───────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use packet_generator::{PacketGenerator, SingleSourceRequest};
//! use telemetry_core::{Catalog, DataPoint, DataPointDraft, DataType};
//!
//! let mut catalog = Catalog::with_asset_types(["HVAC"]);
//! catalog.data_points.push(DataPoint::from_draft(
//!     1,
//!     DataPointDraft::new("Supply Temp", DataType::Float)
//!         .with_identifiers(["sup_t"])
//!         .with_asset_types(["HVAC"]),
//! ));
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let request = SingleSourceRequest::new("HVAC", "PLD-001", day, day, 60);
//! let mut generator = PacketGenerator::new(42);
//! let report = generator.generate_single(&catalog, &request).unwrap();
//! assert_eq!(report.packets.len(), 24);
//! ```

pub mod assembler;
pub mod generator;
pub mod generators;
pub mod merge;
pub mod packet;
pub mod request;
pub mod sequencer;
pub mod timestamp;

// Re-exports for convenience
pub use generator::{GenerationError, GenerationReport, GenerationWarning, PacketGenerator, UnitError};
pub use packet::{
    single_source_file_name, to_pretty_json, EnvelopePacket, FlatPacket, MULTI_SOURCE_FILE_NAME,
};
pub use request::{MultiSourcePlan, SingleSourceRequest, SourcePlan};
pub use sequencer::{Frequency, Window};
pub use timestamp::format_timestamp;
