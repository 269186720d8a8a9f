//! Storage backend trait.

use crate::error::StoreError;
use telemetry_core::Catalog;

/// Trait for catalog persistence.
///
/// This trait abstracts where the catalog lives, allowing the same store
/// logic to work with:
/// - Filesystem storage (`FilesystemBackend`)
/// - Memory (`MemoryBackend`)
pub trait StorageBackend {
    /// Load the persisted catalog.
    ///
    /// Returns None if nothing has been stored yet.
    fn load(&self) -> Result<Option<Catalog>, StoreError>;

    /// Persist the full catalog, replacing what was stored before.
    fn save(&mut self, catalog: &Catalog) -> Result<(), StoreError>;
}
