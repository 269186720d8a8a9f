//! Schema storage for telemetry-mock
//!
//! Holds asset types and data point definitions, validates every write,
//! and persists the result through a pluggable backend.
//!
//! # Architecture
//!
//! - `SchemaStore` owns the current [`Catalog`](telemetry_core::Catalog) and
//!   applies validated mutations to it
//! - `StorageBackend` abstracts where the catalog is persisted
//!
//! ## Storage Backends
//!
//! - `FilesystemBackend` - Stores the catalog as one JSON document
//! - `MemoryBackend` - Keeps the catalog in memory (tests, dry runs)
//!
//! Writes are all-or-nothing: a mutation is applied to a copy of the
//! catalog, persisted, and only then becomes visible. A rejected or failed
//! write leaves the store untouched.

mod error;
mod filesystem;
mod memory;
pub mod backend;
mod store;


pub use backend::StorageBackend;
pub use error::StoreError;
pub use filesystem::FilesystemBackend;
pub use memory::MemoryBackend;
pub use store::{SchemaStore, Upsert, DEFAULT_ASSET_TYPES};
