//! Column layout shared by import, export and the template.

use serde::{Deserialize, Serialize};
use telemetry_core::DataPoint;

/// Column names, in file order.
pub const COLUMNS: [&str; 7] = [
    "name",
    "identifiers",
    "asset_types",
    "data_type",
    "range_min",
    "range_max",
    "string_options",
];

/// Columns that must be present and non-blank on every row.
pub const REQUIRED_COLUMNS: [&str; 4] = ["name", "identifiers", "asset_types", "data_type"];

/// One row of a bulk file, every cell kept as text.
///
/// List cells hold comma-separated values, e.g. `bldg_pwr, main_kw`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkRecord {
    pub name: String,
    pub identifiers: String,
    pub asset_types: String,
    pub data_type: String,
    pub range_min: String,
    pub range_max: String,
    pub string_options: String,
}

impl BulkRecord {
    /// Sample row written into the template.
    pub fn sample() -> Self {
        Self {
            name: "Building Power".to_string(),
            identifiers: "bldg_pwr, main_kw".to_string(),
            asset_types: "Sub-Meter, HVAC".to_string(),
            data_type: "float".to_string(),
            range_min: "0".to_string(),
            range_max: "5000".to_string(),
            string_options: String::new(),
        }
    }
}

impl From<&DataPoint> for BulkRecord {
    fn from(dp: &DataPoint) -> Self {
        Self {
            name: dp.name.clone(),
            identifiers: dp.identifiers.join(", "),
            asset_types: dp.asset_types.join(", "),
            data_type: dp.data_type.to_string(),
            range_min: dp.range_min.map(|v| v.to_string()).unwrap_or_default(),
            range_max: dp.range_max.map(|v| v.to_string()).unwrap_or_default(),
            string_options: dp.string_options.clone().unwrap_or_default(),
        }
    }
}
