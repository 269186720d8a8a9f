//! Validation errors raised for operator input.

use chrono::NaiveDate;

/// Error type for rejected operator input.
///
/// These are user-facing: the message is meant to be shown as-is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was left empty
    #[error("{0} is a required field")]
    MissingField(&'static str),

    /// Identifier already belongs to another data point
    #[error("Identifier '{0}' is already in use. Please choose a unique identifier.")]
    DuplicateIdentifier(String),

    /// Data point name already taken
    #[error("Data point with name '{0}' already exists")]
    DuplicateName(String),

    /// Asset type already exists (compared case-insensitively)
    #[error("Asset type '{0}' already exists (case-insensitive)")]
    DuplicateAssetType(String),

    /// Data type outside the fixed enumeration
    #[error("Invalid data_type '{0}'. Must be one of float, int, boolean, string")]
    InvalidDataType(String),

    /// Referenced asset type is not registered
    #[error("Asset type '{0}' is not valid")]
    UnknownAssetType(String),

    /// End of the generation window precedes its start
    #[error("End date {end} must not be before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Frequency is zero or negative
    #[error("Frequency must be a positive number of minutes, got {0}")]
    NonPositiveFrequency(i64),

    /// Frequency exceeds the mode's upper bound
    #[error("Frequency must be at most {max} minutes, got {value}")]
    FrequencyTooLarge { value: i64, max: i64 },

    /// No usable source id was supplied for an asset type
    #[error("Please provide at least one valid PLD ID for {0}")]
    NoSourceIds(String),
}
