//! Error types for schema storage.

use telemetry_core::{DataPointId, ValidationError};
use thiserror::Error;

/// Errors that can occur while reading or changing the schema store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The write was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No data point with this id.
    #[error("Data point {0} not found")]
    NotFound(DataPointId),

    /// IO error.
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be (de)serialized.
    #[error("Storage format error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// The validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            StoreError::Validation(err) => Some(err),
            _ => None,
        }
    }
}
