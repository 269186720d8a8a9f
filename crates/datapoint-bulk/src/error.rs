//! Error types for bulk import and export.

use schema_store::StoreError;
use thiserror::Error;

/// Problem found in an uploaded file.
///
/// Row numbers count the header as row 1, so the first data row is row 2.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    /// A required column is absent from the header.
    #[error("Missing required column: '{0}'")]
    MissingColumn(&'static str),

    /// A required cell is blank.
    #[error("Row {row}: Missing value in required column '{column}'.")]
    MissingValue { row: usize, column: &'static str },

    /// `data_type` is not one of the supported names.
    #[error("Row {row}: Invalid data_type '{value}'. Must be one of float, int, boolean, string.")]
    InvalidDataType { row: usize, value: String },

    /// Asset type is not registered.
    #[error("Row {row}: Asset type '{asset_type}' is not valid. Available types are: {available}.")]
    UnknownAssetType {
        row: usize,
        asset_type: String,
        available: String,
    },

    /// A range cell does not hold a number.
    #[error("Row {row}: '{value}' in column '{column}' is not a number.")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// Identifier belongs to another data point or appears on another row.
    #[error("Row {row}: Identifier '{identifier}' is already in use.")]
    DuplicateIdentifier { row: usize, identifier: String },
}

/// Errors that can occur during bulk import or export.
#[derive(Error, Debug)]
pub enum BulkError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file failed validation; nothing was applied.
    #[error("Bulk upload rejected with {} error(s)", .0.len())]
    Rejected(Vec<RowError>),

    /// Writing the validated rows failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl BulkError {
    /// Row errors of a rejected upload, empty for other failures.
    pub fn row_errors(&self) -> &[RowError] {
        match self {
            BulkError::Rejected(errors) => errors,
            _ => &[],
        }
    }
}
