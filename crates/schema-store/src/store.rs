//! Validated schema store.

use std::collections::BTreeSet;

use crate::backend::StorageBackend;
use crate::error::StoreError;
use telemetry_core::{
    AssetType, Catalog, DataPoint, DataPointDraft, DataPointId, SchemaSource, ValidationError,
};
use tracing::info;

/// Asset types created when the store holds none.
pub const DEFAULT_ASSET_TYPES: [&str; 6] = [
    "DG",
    "HVAC",
    "SOLAR Inverter",
    "Sub-Meter",
    "Temp Sensor",
    "Hum Sensor",
];

/// Result of an upsert-by-name.
#[derive(Debug, Clone, PartialEq)]
pub enum Upsert {
    Added(DataPoint),
    Updated(DataPoint),
}

impl Upsert {
    pub fn data_point(&self) -> &DataPoint {
        match self {
            Upsert::Added(dp) | Upsert::Updated(dp) => dp,
        }
    }
}

/// Store for asset types and data points.
///
/// Assumes a single writer: uniqueness checks read the in-memory catalog
/// and are not re-checked against the backend before saving.
pub struct SchemaStore<B: StorageBackend> {
    backend: B,
    catalog: Catalog,
}

impl<B: StorageBackend> SchemaStore<B> {
    /// Open the store, seeding the default asset types if there are none.
    pub fn open(mut backend: B) -> Result<Self, StoreError> {
        let mut catalog = backend.load()?.unwrap_or_default();
        if catalog.asset_types.is_empty() {
            catalog.asset_types = DEFAULT_ASSET_TYPES.into_iter().map(AssetType::new).collect();
            backend.save(&catalog)?;
            info!(
                "Initialized schema store with {} default asset types",
                catalog.asset_types.len()
            );
        }
        Ok(Self { backend, catalog })
    }

    /// Current snapshot, suitable as a generation source.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Asset type names in alphabetical order.
    pub fn asset_types(&self) -> BTreeSet<String> {
        self.catalog.asset_types()
    }

    /// All data points, newest first.
    pub fn data_points(&self) -> Vec<&DataPoint> {
        self.catalog.data_points_newest_first()
    }

    pub fn data_point_by_id(&self, id: DataPointId) -> Option<&DataPoint> {
        self.catalog.data_point_by_id(id)
    }

    pub fn data_point_by_name(&self, name: &str) -> Option<&DataPoint> {
        self.catalog.data_point_by_name(name)
    }

    pub fn data_points_by_asset_type(&self, asset_type: &str) -> Vec<&DataPoint> {
        self.catalog.data_points_by_asset_type(asset_type)
    }

    /// First identifier already used by a data point other than `exclude`.
    pub fn check_identifier_uniqueness(
        &self,
        identifiers: &[String],
        exclude: Option<DataPointId>,
    ) -> Option<String> {
        self.catalog.identifier_collision(identifiers, exclude)
    }

    /// Register a new asset type. Names are unique ignoring case.
    pub fn add_asset_type(&mut self, name: &str) -> Result<(), StoreError> {
        let name = name.trim();
        self.commit(|catalog| {
            if name.is_empty() {
                return Err(ValidationError::MissingField("asset type name").into());
            }
            if catalog.find_asset_type_ignore_case(name).is_some() {
                return Err(ValidationError::DuplicateAssetType(name.to_string()).into());
            }
            catalog.asset_types.push(AssetType::new(name));
            Ok(())
        })?;
        info!("Added asset type '{name}'");
        Ok(())
    }

    /// Create a data point from a draft and assign it the next id.
    pub fn add_data_point(&mut self, draft: DataPointDraft) -> Result<DataPoint, StoreError> {
        let dp = self.commit(|catalog| insert_data_point(catalog, draft))?;
        info!("Added data point '{}' (id {})", dp.name, dp.id);
        Ok(dp)
    }

    /// Replace everything but the name of an existing data point.
    pub fn update_data_point(
        &mut self,
        id: DataPointId,
        draft: DataPointDraft,
    ) -> Result<DataPoint, StoreError> {
        let dp = self.commit(|catalog| replace_data_point(catalog, id, draft))?;
        info!("Updated data point '{}' (id {})", dp.name, dp.id);
        Ok(dp)
    }

    /// Update the data point with the draft's name, or add it if there is none.
    pub fn upsert_by_name(&mut self, draft: DataPointDraft) -> Result<Upsert, StoreError> {
        self.commit(|catalog| upsert(catalog, draft))
    }

    /// Upsert several drafts as one write: either all are applied or none.
    pub fn upsert_all(&mut self, drafts: Vec<DataPointDraft>) -> Result<Vec<Upsert>, StoreError> {
        let count = drafts.len();
        let results = self.commit(|catalog| {
            drafts
                .into_iter()
                .map(|draft| upsert(catalog, draft))
                .collect::<Result<Vec<_>, _>>()
        })?;
        info!("Applied {count} data point upserts");
        Ok(results)
    }

    /// Remove every data point. Asset types are kept.
    pub fn delete_all_data_points(&mut self) -> Result<usize, StoreError> {
        let removed = self.commit(|catalog| {
            let removed = catalog.data_points.len();
            catalog.data_points.clear();
            Ok(removed)
        })?;
        info!("Deleted {removed} data points");
        Ok(removed)
    }

    /// Apply `change` to a copy of the catalog, persist it, then publish it.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut Catalog) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut next = self.catalog.clone();
        let out = change(&mut next)?;
        self.backend.save(&next)?;
        self.catalog = next;
        Ok(out)
    }
}

fn check_asset_types(catalog: &Catalog, draft: &DataPointDraft) -> Result<(), ValidationError> {
    match draft
        .asset_types
        .iter()
        .find(|name| !catalog.has_asset_type(name))
    {
        Some(unknown) => Err(ValidationError::UnknownAssetType(unknown.clone())),
        None => Ok(()),
    }
}

fn insert_data_point(catalog: &mut Catalog, draft: DataPointDraft) -> Result<DataPoint, StoreError> {
    let draft = draft.normalized();
    if draft.name.is_empty() {
        return Err(ValidationError::MissingField("name").into());
    }
    if draft.asset_types.is_empty() {
        return Err(ValidationError::MissingField("asset_types").into());
    }
    if catalog.data_point_by_name(&draft.name).is_some() {
        return Err(ValidationError::DuplicateName(draft.name).into());
    }
    if let Some(identifier) = catalog.identifier_collision(&draft.identifiers, None) {
        return Err(ValidationError::DuplicateIdentifier(identifier).into());
    }
    check_asset_types(catalog, &draft)?;

    let dp = DataPoint::from_draft(catalog.next_id, draft);
    catalog.next_id += 1;
    catalog.data_points.push(dp.clone());
    Ok(dp)
}

fn replace_data_point(
    catalog: &mut Catalog,
    id: DataPointId,
    draft: DataPointDraft,
) -> Result<DataPoint, StoreError> {
    let draft = draft.normalized();
    let idx = catalog
        .data_points
        .iter()
        .position(|dp| dp.id == id)
        .ok_or(StoreError::NotFound(id))?;
    if let Some(identifier) = catalog.identifier_collision(&draft.identifiers, Some(id)) {
        return Err(ValidationError::DuplicateIdentifier(identifier).into());
    }
    check_asset_types(catalog, &draft)?;

    let existing = &mut catalog.data_points[idx];
    let name = std::mem::take(&mut existing.name);
    *existing = DataPoint::from_draft(id, DataPointDraft { name, ..draft });
    Ok(existing.clone())
}

fn upsert(catalog: &mut Catalog, draft: DataPointDraft) -> Result<Upsert, StoreError> {
    let existing = catalog
        .data_point_by_name(draft.name.trim())
        .map(|dp| dp.id);
    match existing {
        Some(id) => replace_data_point(catalog, id, draft).map(Upsert::Updated),
        None => insert_data_point(catalog, draft).map(Upsert::Added),
    }
}
