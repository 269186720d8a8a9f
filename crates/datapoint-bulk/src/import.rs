//! Bulk import: read, validate every row, then upsert all or nothing.

use crate::error::{BulkError, RowError};
use crate::record::{BulkRecord, COLUMNS, REQUIRED_COLUMNS};
use csv::{ReaderBuilder, StringRecord, Trim};
use schema_store::{SchemaStore, StorageBackend, Upsert};
use std::collections::HashMap;
use std::io::Read;
use telemetry_core::{split_list, Catalog, DataPointDraft, DataType, SchemaSource};
use tracing::{debug, info, warn};

/// Outcome of an applied import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub updated: usize,
}

/// Read a bulk CSV file into records.
///
/// Fails with [`BulkError::Rejected`] holding a single
/// [`RowError::MissingColumn`] when a required column is absent; no rows
/// are examined in that case. Optional columns may be left out.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<BulkRecord>, BulkError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let position = |column: &str| headers.iter().position(|h| h == column);

    if let Some(missing) = REQUIRED_COLUMNS.into_iter().find(|c| position(c).is_none()) {
        return Err(BulkError::Rejected(vec![RowError::MissingColumn(missing)]));
    }
    let indexes: Vec<Option<usize>> = COLUMNS.into_iter().map(position).collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |i: usize| cell_text(&row, indexes[i]);
        records.push(BulkRecord {
            name: cell(0),
            identifiers: cell(1),
            asset_types: cell(2),
            data_type: cell(3),
            range_min: cell(4),
            range_max: cell(5),
            string_options: cell(6),
        });
    }
    debug!("Read {} bulk rows", records.len());
    Ok(records)
}

fn cell_text(row: &StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|i| row.get(i))
        .unwrap_or_default()
        .to_string()
}

/// Validate every record against the catalog, collecting all problems.
///
/// Identifiers must not belong to another data point (a row whose name
/// matches an existing point may keep that point's identifiers) and must
/// not repeat across rows.
pub fn validate_records(
    records: &[BulkRecord],
    catalog: &Catalog,
) -> Result<Vec<DataPointDraft>, Vec<RowError>> {
    let available = catalog.asset_types();
    let available_text = available.iter().cloned().collect::<Vec<_>>().join(", ");

    let mut errors = Vec::new();
    let mut drafts = Vec::with_capacity(records.len());
    let mut seen_identifiers: HashMap<String, usize> = HashMap::new();

    for (i, record) in records.iter().enumerate() {
        let row = i + 2;
        let errors_before = errors.len();

        let required = [
            ("name", &record.name),
            ("identifiers", &record.identifiers),
            ("asset_types", &record.asset_types),
            ("data_type", &record.data_type),
        ];
        for (column, value) in required {
            if value.trim().is_empty() {
                errors.push(RowError::MissingValue { row, column });
            }
        }

        let data_type = match record.data_type.trim() {
            "" => None,
            text => match text.parse::<DataType>() {
                Ok(data_type) => Some(data_type),
                Err(_) => {
                    errors.push(RowError::InvalidDataType {
                        row,
                        value: text.to_string(),
                    });
                    None
                }
            },
        };

        let asset_types = split_list(&record.asset_types);
        for asset_type in asset_types.iter().filter(|a| !available.contains(*a)) {
            errors.push(RowError::UnknownAssetType {
                row,
                asset_type: asset_type.clone(),
                available: available_text.clone(),
            });
        }

        let range_min = parse_bound(row, "range_min", &record.range_min, &mut errors);
        let range_max = parse_bound(row, "range_max", &record.range_max, &mut errors);

        let identifiers = split_list(&record.identifiers);
        let own_id = catalog.data_point_by_name(record.name.trim()).map(|dp| dp.id);
        for identifier in &identifiers {
            let taken_by_row = seen_identifiers.insert(identifier.clone(), row).is_some();
            let taken_by_point = catalog
                .identifier_collision(std::slice::from_ref(identifier), own_id)
                .is_some();
            if taken_by_row || taken_by_point {
                errors.push(RowError::DuplicateIdentifier {
                    row,
                    identifier: identifier.clone(),
                });
            }
        }

        if let (Some(data_type), true) = (data_type, errors.len() == errors_before) {
            let mut draft = DataPointDraft::new(record.name.trim(), data_type)
                .with_identifiers(identifiers)
                .with_asset_types(asset_types)
                .with_range(range_min, range_max);
            if !record.string_options.trim().is_empty() {
                draft = draft.with_string_options(record.string_options.trim());
            }
            drafts.push(draft);
        }
    }

    if errors.is_empty() {
        Ok(drafts)
    } else {
        Err(errors)
    }
}

fn parse_bound(
    row: usize,
    column: &'static str,
    text: &str,
    errors: &mut Vec<RowError>,
) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match text.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(RowError::InvalidNumber {
                row,
                column,
                value: text.to_string(),
            });
            None
        }
    }
}

/// Validate a bulk CSV file and upsert its rows by name.
///
/// Nothing is written unless every row is valid.
pub fn import_data_points<R: Read, B: StorageBackend>(
    reader: R,
    store: &mut SchemaStore<B>,
) -> Result<ImportSummary, BulkError> {
    let records = read_records(reader)?;
    let drafts = validate_records(&records, store.catalog()).map_err(|errors| {
        warn!("Bulk upload rejected with {} errors", errors.len());
        BulkError::Rejected(errors)
    })?;

    if drafts.is_empty() {
        info!("Bulk upload contained no rows");
        return Ok(ImportSummary::default());
    }

    let mut summary = ImportSummary::default();
    for result in store.upsert_all(drafts)? {
        match result {
            Upsert::Added(_) => summary.added += 1,
            Upsert::Updated(_) => summary.updated += 1,
        }
    }
    info!(
        "Bulk upload applied: {} added, {} updated",
        summary.added, summary.updated
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_store::MemoryBackend;

    const HEADER: &str = "name,identifiers,asset_types,data_type,range_min,range_max,string_options\n";

    fn store() -> SchemaStore<MemoryBackend> {
        SchemaStore::open(MemoryBackend::new()).unwrap()
    }

    fn rejected(result: Result<ImportSummary, BulkError>) -> Vec<RowError> {
        match result {
            Err(BulkError::Rejected(errors)) => errors,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_import_adds_then_updates_by_name() {
        let mut store = store();
        let csv = format!(
            "{HEADER}Building Power,\"bldg_pwr, main_kw\",\"Sub-Meter, HVAC\",float,0,5000,\n\
             Mode,hvac_mode,HVAC,string,,,\"AUTO, COOL\"\n"
        );
        let summary = import_data_points(csv.as_bytes(), &mut store).unwrap();
        assert_eq!(summary, ImportSummary { added: 2, updated: 0 });

        let dp = store.data_point_by_name("Building Power").unwrap();
        assert_eq!(dp.identifiers, vec!["bldg_pwr", "main_kw"]);
        assert_eq!(dp.asset_types, vec!["Sub-Meter", "HVAC"]);
        assert_eq!(dp.range_max, Some(5000.0));
        assert_eq!(
            store.data_point_by_name("Mode").unwrap().string_options.as_deref(),
            Some("AUTO, COOL")
        );

        // same identifiers on the same name is an update, not a collision
        let csv = format!("{HEADER}Building Power,bldg_pwr,HVAC,int,1,9,\n");
        let summary = import_data_points(csv.as_bytes(), &mut store).unwrap();
        assert_eq!(summary, ImportSummary { added: 0, updated: 1 });
        let dp = store.data_point_by_name("Building Power").unwrap();
        assert_eq!(dp.data_type, DataType::Int);
        assert_eq!(dp.identifiers, vec!["bldg_pwr"]);
    }

    #[test]
    fn test_missing_column_stops_validation() {
        let mut store = store();
        let csv = "name,identifiers,data_type\nX,x,float\n";
        let errors = rejected(import_data_points(csv.as_bytes(), &mut store));
        assert_eq!(errors, vec![RowError::MissingColumn("asset_types")]);
    }

    #[test]
    fn test_all_row_errors_are_collected() {
        let mut store = store();
        let csv = format!(
            "{HEADER}Good,good,DG,float,,,\n\
             ,x1,HVAC,float,,,\n\
             Bad Type,x2,HVAC,decimal,,,\n\
             Bad Asset,x3,Chiller,int,abc,,\n\
             Dup,good,DG,boolean,,,\n"
        );
        let errors = rejected(import_data_points(csv.as_bytes(), &mut store));

        assert_eq!(errors.len(), 5);
        assert_eq!(errors[0], RowError::MissingValue { row: 3, column: "name" });
        assert_eq!(
            errors[1],
            RowError::InvalidDataType {
                row: 4,
                value: "decimal".to_string()
            }
        );
        assert!(matches!(
            &errors[2],
            RowError::UnknownAssetType { row: 5, asset_type, .. } if asset_type == "Chiller"
        ));
        assert!(matches!(&errors[3], RowError::InvalidNumber { row: 5, column: "range_min", .. }));
        assert_eq!(
            errors[4],
            RowError::DuplicateIdentifier {
                row: 6,
                identifier: "good".to_string()
            }
        );
        // the valid first row was not applied either
        assert!(store.data_points().is_empty());
    }

    #[test]
    fn test_identifier_owned_by_other_point_is_rejected() {
        let mut store = store();
        store
            .add_data_point(
                DataPointDraft::new("Fuel", DataType::Int)
                    .with_identifiers(["fuel"])
                    .with_asset_types(["DG"]),
            )
            .unwrap();

        let csv = format!("{HEADER}Fuel Level,fuel,DG,int,0,100,\n");
        let errors = rejected(import_data_points(csv.as_bytes(), &mut store));
        assert_eq!(
            errors,
            vec![RowError::DuplicateIdentifier {
                row: 2,
                identifier: "fuel".to_string()
            }]
        );
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let csv = "name,identifiers,asset_types,data_type\nRunning,run,DG,boolean\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].range_min, "");

        let drafts = validate_records(&records, &Catalog::with_asset_types(["DG"])).unwrap();
        assert_eq!(drafts[0].data_type, DataType::Boolean);
        assert_eq!(drafts[0].string_options, None);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RowError::MissingColumn("name").to_string(),
            "Missing required column: 'name'"
        );
        assert_eq!(
            RowError::MissingValue { row: 2, column: "data_type" }.to_string(),
            "Row 2: Missing value in required column 'data_type'."
        );
    }
}
