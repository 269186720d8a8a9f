//! Data point command handlers.

use anyhow::Context;
use clap::{Args, Subcommand};
use datapoint_bulk::{import_data_points, write_export, write_template, BulkError};
use schema_store::{SchemaStore, StorageBackend};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use telemetry_core::{split_list, DataPoint, DataPointDraft, DataType};

/// Editable data point fields shared by `add` and `update`
#[derive(Args, Clone, Debug)]
pub struct DataPointFields {
    /// Comma-separated packet keys; the first one is used in packets
    #[arg(long, default_value = "")]
    pub identifiers: String,

    /// Comma-separated asset types the point applies to
    #[arg(long, default_value = "")]
    pub asset_types: String,

    /// Value type: float, int, boolean or string
    #[arg(long)]
    pub data_type: DataType,

    /// Lower bound for float and int values
    #[arg(long, allow_negative_numbers = true)]
    pub range_min: Option<f64>,

    /// Upper bound for float and int values
    #[arg(long, allow_negative_numbers = true)]
    pub range_max: Option<f64>,

    /// Comma-separated candidate values for string points
    #[arg(long)]
    pub string_options: Option<String>,
}

impl DataPointFields {
    /// Turn the fields into a draft with the given name.
    pub fn into_draft(self, name: &str) -> DataPointDraft {
        let mut draft = DataPointDraft::new(name, self.data_type)
            .with_identifiers(split_list(&self.identifiers))
            .with_asset_types(split_list(&self.asset_types))
            .with_range(self.range_min, self.range_max);
        if let Some(options) = self.string_options {
            draft = draft.with_string_options(options.trim());
        }
        draft
    }
}

/// Data point subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum DataPointCommand {
    /// List all data points, newest first
    List,

    /// Show one data point as JSON
    Show {
        /// Data point id
        #[arg(long, conflicts_with = "name", required_unless_present = "name")]
        id: Option<u64>,

        /// Data point name
        #[arg(long)]
        name: Option<String>,
    },

    /// Add a data point
    Add {
        /// Unique data point name
        #[arg(long)]
        name: String,

        #[command(flatten)]
        fields: DataPointFields,
    },

    /// Replace the fields of an existing data point (the name is kept)
    Update {
        /// Data point id
        #[arg(long)]
        id: u64,

        #[command(flatten)]
        fields: DataPointFields,
    },

    /// Delete every data point
    DeleteAll {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Validate a CSV file and upsert its rows by name
    Import {
        /// CSV file to import
        file: PathBuf,
    },

    /// Write all data points to a CSV file
    Export {
        /// Output CSV file
        file: PathBuf,
    },

    /// Write an import template with one sample row
    Template {
        /// Output CSV file
        file: PathBuf,
    },
}

/// Run a data point command.
pub fn run_data_points<B: StorageBackend>(
    store: &mut SchemaStore<B>,
    command: DataPointCommand,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        DataPointCommand::List => {
            let points = store.data_points();
            if points.is_empty() {
                writeln!(out, "No data points defined")?;
            } else {
                write_listing(out, &points)?;
            }
        }
        DataPointCommand::Show { id, name } => {
            let dp = match (id, name.as_deref()) {
                (Some(id), _) => store
                    .data_point_by_id(id)
                    .with_context(|| format!("Data point {id} not found"))?,
                (None, Some(name)) => store
                    .data_point_by_name(name)
                    .with_context(|| format!("Data point '{name}' not found"))?,
                (None, None) => anyhow::bail!("Either --id or --name is required"),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(dp)?)?;
        }
        DataPointCommand::Add { name, fields } => {
            let dp = store.add_data_point(fields.into_draft(&name))?;
            writeln!(out, "Data point '{}' added with id {}", dp.name, dp.id)?;
        }
        DataPointCommand::Update { id, fields } => {
            let dp = store.update_data_point(id, fields.into_draft(""))?;
            writeln!(out, "Data point '{}' (id {}) updated", dp.name, dp.id)?;
        }
        DataPointCommand::DeleteAll { yes } => {
            if !yes {
                anyhow::bail!("Refusing to delete all data points without --yes");
            }
            let removed = store.delete_all_data_points()?;
            writeln!(out, "Deleted {removed} data points")?;
        }
        DataPointCommand::Import { file } => {
            let reader = File::open(&file)
                .with_context(|| format!("Failed to open bulk file: {file:?}"))?;
            match import_data_points(BufReader::new(reader), store) {
                Ok(summary) => writeln!(
                    out,
                    "Bulk upload complete: {} added, {} updated",
                    summary.added, summary.updated
                )?,
                Err(BulkError::Rejected(errors)) => {
                    for error in &errors {
                        writeln!(out, "{error}")?;
                    }
                    anyhow::bail!(
                        "Bulk upload rejected with {} error(s); no changes were made",
                        errors.len()
                    );
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to import {file:?}"));
                }
            }
        }
        DataPointCommand::Export { file } => {
            let writer = create_file(&file)?;
            let points = store.data_points();
            let rows = write_export(writer, points.into_iter().rev())?;
            writeln!(out, "Exported {rows} data points to {}", file.display())?;
        }
        DataPointCommand::Template { file } => {
            write_template(create_file(&file)?)?;
            writeln!(out, "Template written to {}", file.display())?;
        }
    }
    Ok(())
}

fn create_file(path: &Path) -> anyhow::Result<BufWriter<File>> {
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {path:?}"))?;
    Ok(BufWriter::new(file))
}

fn write_listing(out: &mut dyn Write, points: &[&DataPoint]) -> std::io::Result<()> {
    writeln!(
        out,
        "{:<4} {:<24} {:<24} {:<24} {:<8} CONSTRAINTS",
        "ID", "NAME", "IDENTIFIERS", "ASSET TYPES", "TYPE"
    )?;
    for dp in points {
        writeln!(
            out,
            "{:<4} {:<24} {:<24} {:<24} {:<8} {}",
            dp.id,
            dp.name,
            dp.identifiers.join(", "),
            dp.asset_types.join(", "),
            dp.data_type.as_str(),
            dp.constraint_summary()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_store::MemoryBackend;
    use tempfile::TempDir;

    fn store() -> SchemaStore<MemoryBackend> {
        SchemaStore::open(MemoryBackend::new()).unwrap()
    }

    fn fields(identifiers: &str, asset_types: &str, data_type: DataType) -> DataPointFields {
        DataPointFields {
            identifiers: identifiers.to_string(),
            asset_types: asset_types.to_string(),
            data_type,
            range_min: None,
            range_max: None,
            string_options: None,
        }
    }

    fn run(store: &mut SchemaStore<MemoryBackend>, command: DataPointCommand) -> anyhow::Result<String> {
        let mut out: Vec<u8> = Vec::new();
        run_data_points(store, command, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_add_list_show() {
        let mut store = store();
        let output = run(
            &mut store,
            DataPointCommand::Add {
                name: "Supply Temp".to_string(),
                fields: fields("sup_t, supply", "HVAC", DataType::Float),
            },
        )
        .unwrap();
        assert_eq!(output, "Data point 'Supply Temp' added with id 1\n");

        let listing = run(&mut store, DataPointCommand::List).unwrap();
        assert!(listing.lines().nth(1).unwrap().contains("sup_t, supply"));

        let shown = run(
            &mut store,
            DataPointCommand::Show {
                id: None,
                name: Some("Supply Temp".to_string()),
            },
        )
        .unwrap();
        let dp: DataPoint = serde_json::from_str(&shown).unwrap();
        assert_eq!(dp.identifiers, vec!["sup_t", "supply"]);
    }

    #[test]
    fn test_update_and_missing() {
        let mut store = store();
        run(
            &mut store,
            DataPointCommand::Add {
                name: "Fuel".to_string(),
                fields: fields("fuel", "DG", DataType::Int),
            },
        )
        .unwrap();

        let mut changed = fields("fuel_pct", "DG", DataType::Int);
        changed.range_max = Some(100.0);
        run(&mut store, DataPointCommand::Update { id: 1, fields: changed }).unwrap();
        let dp = store.data_point_by_id(1).unwrap();
        assert_eq!(dp.name, "Fuel");
        assert_eq!(dp.identifiers, vec!["fuel_pct"]);

        let err = run(
            &mut store,
            DataPointCommand::Show {
                id: Some(9),
                name: None,
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_delete_all_requires_confirmation() {
        let mut store = store();
        run(
            &mut store,
            DataPointCommand::Add {
                name: "Fuel".to_string(),
                fields: fields("fuel", "DG", DataType::Int),
            },
        )
        .unwrap();

        assert!(run(&mut store, DataPointCommand::DeleteAll { yes: false }).is_err());
        assert_eq!(store.data_points().len(), 1);

        let output = run(&mut store, DataPointCommand::DeleteAll { yes: true }).unwrap();
        assert_eq!(output, "Deleted 1 data points\n");
        assert!(store.data_points().is_empty());
    }

    #[test]
    fn test_template_import_export() {
        let temp_dir = TempDir::new().unwrap();
        let template = temp_dir.path().join("template.csv");
        let export = temp_dir.path().join("export.csv");
        let mut store = store();

        run(&mut store, DataPointCommand::Template { file: template.clone() }).unwrap();
        let output = run(&mut store, DataPointCommand::Import { file: template }).unwrap();
        assert_eq!(output, "Bulk upload complete: 1 added, 0 updated\n");

        run(&mut store, DataPointCommand::Export { file: export.clone() }).unwrap();
        let exported = std::fs::read_to_string(&export).unwrap();
        assert!(exported.contains("Building Power,\"bldg_pwr, main_kw\""));
    }

    #[test]
    fn test_rejected_import_lists_errors() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("bad.csv");
        std::fs::write(
            &file,
            "name,identifiers,asset_types,data_type\nX,x,Chiller,float\nY,y,DG,decimal\n",
        )
        .unwrap();

        let mut store = store();
        let mut out: Vec<u8> = Vec::new();
        let err = run_data_points(&mut store, DataPointCommand::Import { file }, &mut out)
            .unwrap_err();
        assert!(err.to_string().contains("2 error(s)"));

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Row 2: Asset type 'Chiller' is not valid"));
        assert!(printed.contains("Row 3: Invalid data_type 'decimal'"));
        assert!(store.data_points().is_empty());
    }
}
