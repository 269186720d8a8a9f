//! In-memory storage backend.

use crate::backend::StorageBackend;
use crate::error::StoreError;
use telemetry_core::Catalog;

/// Backend that keeps the last saved catalog in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    saved: Option<Catalog>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            saved: Some(catalog),
        }
    }

    /// The last saved catalog.
    pub fn saved(&self) -> Option<&Catalog> {
        self.saved.as_ref()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> Result<Option<Catalog>, StoreError> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, catalog: &Catalog) -> Result<(), StoreError> {
        self.saved = Some(catalog.clone());
        Ok(())
    }
}
