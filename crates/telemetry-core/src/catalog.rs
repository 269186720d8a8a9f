//! In-memory snapshot of asset types and data points.

use crate::schema::{AssetType, DataPoint, DataPointId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Read-only lookups the generation engine needs from a schema store.
pub trait SchemaSource {
    /// All asset type names in alphabetical order.
    fn asset_types(&self) -> BTreeSet<String>;

    /// Data points that list `asset_type` among their asset types.
    fn data_points_by_asset_type(&self, asset_type: &str) -> Vec<&DataPoint>;

    fn data_point_by_id(&self, id: DataPointId) -> Option<&DataPoint>;

    fn data_point_by_name(&self, name: &str) -> Option<&DataPoint>;

    /// Whether an asset type with exactly this name exists.
    fn has_asset_type(&self, name: &str) -> bool {
        self.asset_types().contains(name)
    }
}

/// Snapshot of everything the schema store holds.
///
/// Data points are kept in creation order; `next_id` is the id the next
/// created data point will receive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub asset_types: Vec<AssetType>,

    #[serde(default)]
    pub data_points: Vec<DataPoint>,

    #[serde(default = "first_id")]
    pub next_id: DataPointId,
}

fn first_id() -> DataPointId {
    1
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            asset_types: Vec::new(),
            data_points: Vec::new(),
            next_id: first_id(),
        }
    }
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the given asset type names.
    pub fn with_asset_types<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            asset_types: names.into_iter().map(AssetType::new).collect(),
            ..Self::default()
        }
    }

    /// Find an asset type whose name matches case-insensitively.
    pub fn find_asset_type_ignore_case(&self, name: &str) -> Option<&AssetType> {
        self.asset_types.iter().find(|a| a.same_name(name))
    }

    /// Return the first identifier already used by another data point.
    ///
    /// `exclude` skips the record being edited, so a point may keep its
    /// own identifiers.
    pub fn identifier_collision(
        &self,
        identifiers: &[String],
        exclude: Option<DataPointId>,
    ) -> Option<String> {
        identifiers
            .iter()
            .find(|identifier| {
                self.data_points
                    .iter()
                    .filter(|dp| Some(dp.id) != exclude)
                    .any(|dp| dp.identifiers.contains(*identifier))
            })
            .cloned()
    }

    /// All data points, newest first.
    pub fn data_points_newest_first(&self) -> Vec<&DataPoint> {
        let mut points: Vec<&DataPoint> = self.data_points.iter().collect();
        points.sort_by(|a, b| b.id.cmp(&a.id));
        points
    }
}

impl SchemaSource for Catalog {
    fn asset_types(&self) -> BTreeSet<String> {
        self.asset_types.iter().map(|a| a.name.clone()).collect()
    }

    fn data_points_by_asset_type(&self, asset_type: &str) -> Vec<&DataPoint> {
        self.data_points
            .iter()
            .filter(|dp| dp.applies_to(asset_type))
            .collect()
    }

    fn data_point_by_id(&self, id: DataPointId) -> Option<&DataPoint> {
        self.data_points.iter().find(|dp| dp.id == id)
    }

    fn data_point_by_name(&self, name: &str) -> Option<&DataPoint> {
        self.data_points.iter().find(|dp| dp.name == name)
    }

    fn has_asset_type(&self, name: &str) -> bool {
        self.asset_types.iter().any(|a| a.name == name)
    }
}
