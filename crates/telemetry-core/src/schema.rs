//! Data point and asset type definitions.
//!
//! ## Type Hierarchy
//!
//! - `AssetType` - A category of equipment that owns data points
//! - `DataPointDraft` - Operator input for a data point (no id yet)
//! - `DataPoint` - A stored data point with its surrogate id
//!
//! Identifiers and asset types are kept as native lists here. Turning them
//! into text (comma-separated cells, JSON documents) is the job of whatever
//! reads or writes them.

use crate::types::DataType;
use serde::{Deserialize, Serialize};

/// Surrogate key assigned to a data point on creation.
pub type DataPointId = u64;

/// Category of physical equipment, e.g. `HVAC`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetType {
    pub name: String,
}

impl AssetType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Case-insensitive name comparison used for uniqueness.
    pub fn same_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }
}

/// A data point as entered by the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPointDraft {
    /// Unique name, also the natural key for upserts
    pub name: String,

    /// Packet field keys, the first one wins
    #[serde(default)]
    pub identifiers: Vec<String>,

    /// Asset types this point applies to
    #[serde(default)]
    pub asset_types: Vec<String>,

    /// Declared value type
    pub data_type: DataType,

    /// Lower bound for float/int
    #[serde(default)]
    pub range_min: Option<f64>,

    /// Upper bound for float/int
    #[serde(default)]
    pub range_max: Option<f64>,

    /// Comma-separated candidates for string
    #[serde(default)]
    pub string_options: Option<String>,
}

impl DataPointDraft {
    /// Create a draft with no identifiers, asset types or constraints.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            identifiers: Vec::new(),
            asset_types: Vec::new(),
            data_type,
            range_min: None,
            range_max: None,
            string_options: None,
        }
    }

    pub fn with_identifiers<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifiers = identifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_asset_types<I, S>(mut self, asset_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.asset_types = asset_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.range_min = min;
        self.range_max = max;
        self
    }

    pub fn with_string_options(mut self, options: impl Into<String>) -> Self {
        self.string_options = Some(options.into());
        self
    }

    /// Trim text fields, drop blank identifiers and duplicate asset types.
    ///
    /// Order of identifiers is preserved since the first one becomes the
    /// packet key.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.identifiers = dedup_trimmed(self.identifiers);
        self.asset_types = dedup_trimmed(self.asset_types);
        self.string_options = self.string_options.filter(|s| !s.is_empty());
        self
    }
}

/// A stored data point schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub id: DataPointId,
    pub name: String,
    #[serde(default)]
    pub identifiers: Vec<String>,
    #[serde(default)]
    pub asset_types: Vec<String>,
    pub data_type: DataType,
    #[serde(default)]
    pub range_min: Option<f64>,
    #[serde(default)]
    pub range_max: Option<f64>,
    #[serde(default)]
    pub string_options: Option<String>,
}

impl DataPoint {
    /// Build a stored data point from a draft.
    pub fn from_draft(id: DataPointId, draft: DataPointDraft) -> Self {
        Self {
            id,
            name: draft.name,
            identifiers: draft.identifiers,
            asset_types: draft.asset_types,
            data_type: draft.data_type,
            range_min: draft.range_min,
            range_max: draft.range_max,
            string_options: draft.string_options,
        }
    }

    /// Turn the stored point back into an editable draft.
    pub fn to_draft(&self) -> DataPointDraft {
        DataPointDraft {
            name: self.name.clone(),
            identifiers: self.identifiers.clone(),
            asset_types: self.asset_types.clone(),
            data_type: self.data_type,
            range_min: self.range_min,
            range_max: self.range_max,
            string_options: self.string_options.clone(),
        }
    }

    /// Field name used for this point inside a packet.
    ///
    /// The first identifier, or the name with spaces replaced by
    /// underscores and lower-cased when there are no identifiers.
    pub fn packet_key(&self) -> String {
        match self.identifiers.first() {
            Some(identifier) => identifier.clone(),
            None => self.name.replace(' ', "_").to_lowercase(),
        }
    }

    /// Whether the point applies to the given asset type (exact match).
    pub fn applies_to(&self, asset_type: &str) -> bool {
        self.asset_types.iter().any(|a| a == asset_type)
    }

    /// Human-readable constraint summary, as shown in listings.
    pub fn constraint_summary(&self) -> String {
        match self.data_type {
            DataType::Float | DataType::Int => format!(
                "{} - {}",
                display_bound(self.range_min),
                display_bound(self.range_max)
            ),
            DataType::String => self
                .string_options
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
            DataType::Boolean => "N/A".to_string(),
        }
    }
}

fn display_bound(bound: Option<f64>) -> String {
    bound.map_or_else(|| "None".to_string(), |b| b.to_string())
}

fn dedup_trimmed(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim();
        if !item.is_empty() && !out.iter().any(|existing| existing == item) {
            out.push(item.to_string());
        }
    }
    out
}

/// Split comma-separated operator input into trimmed, non-blank items.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
