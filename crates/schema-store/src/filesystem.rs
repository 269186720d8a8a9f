//! Filesystem-based catalog storage implementation.

use std::path::{Path, PathBuf};

use crate::backend::StorageBackend;
use crate::error::StoreError;
use telemetry_core::Catalog;

/// Filesystem implementation of StorageBackend trait.
///
/// Stores the catalog as a single pretty-printed JSON file. Saves go to a
/// sibling temporary file first and are renamed into place.
pub struct FilesystemBackend {
    path: PathBuf,
}

impl FilesystemBackend {
    /// Create a new FilesystemBackend for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StorageBackend for FilesystemBackend {
    fn load(&self) -> Result<Option<Catalog>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&mut self, catalog: &Catalog) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        std::fs::write(&temp, serde_json::to_string_pretty(catalog)?)?;
        if let Err(err) = std::fs::rename(&temp, &self.path) {
            let _ = std::fs::remove_file(&temp);
            return Err(err.into());
        }
        tracing::debug!("Stored catalog to {}", self.path.display());
        Ok(())
    }
}
