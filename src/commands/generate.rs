//! Generate command handlers.

use crate::config::{
    load_plan, parse_frequency_assignment, parse_source_assignment, plan_from_assignments,
    FrequencyAssignment, SourceAssignment,
};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use packet_generator::{
    single_source_file_name, to_pretty_json, GenerationReport, PacketGenerator,
    SingleSourceRequest, MULTI_SOURCE_FILE_NAME,
};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use telemetry_core::SchemaSource;

/// Output options shared by both generation modes
#[derive(Args, Clone, Debug)]
pub struct OutputOpts {
    /// Directory the JSON file is written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Seed for reproducible values (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the first generated packet
    #[arg(long)]
    pub preview: bool,
}

/// Single-source generation arguments
#[derive(Args, Clone, Debug)]
pub struct SingleArgs {
    /// Asset type whose data points are generated
    #[arg(long)]
    pub asset_type: String,

    /// Source id (PLD) stamped on every packet
    #[arg(long)]
    pub pld: String,

    /// First day of the window (defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last day of the window (defaults to today)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Minutes between packets (1 to 60)
    #[arg(long, default_value = "5", allow_negative_numbers = true)]
    pub frequency: i64,

    #[command(flatten)]
    pub output: OutputOpts,
}

/// Multi-source generation arguments
#[derive(Args, Clone, Debug)]
pub struct MultiArgs {
    /// YAML plan file
    #[arg(long, conflicts_with_all = ["start_date", "end_date", "sources", "frequencies"])]
    pub plan: Option<PathBuf>,

    /// First day of the window (defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Last day of the window (defaults to today)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Source ids for an asset type, e.g. "HVAC=PLD-1,PLD-2" (repeatable)
    #[arg(long = "source", value_name = "ASSET_TYPE=IDS", value_parser = parse_source_assignment)]
    pub sources: Vec<SourceAssignment>,

    /// Minutes between packets for an asset type, e.g. "HVAC=15" (repeatable, default 60)
    #[arg(long = "frequency", value_name = "ASSET_TYPE=MINUTES", value_parser = parse_frequency_assignment)]
    pub frequencies: Vec<FrequencyAssignment>,

    #[command(flatten)]
    pub output: OutputOpts,
}

/// Generate subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum GenerateCommand {
    /// Envelope packets for one asset type and one source id
    Single(SingleArgs),

    /// Flat packets for several asset types and source ids, merged by time
    Multi(MultiArgs),
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Run a generate command.
///
/// Returns the path of the written file, or None when nothing was generated.
pub fn run_generate<S: SchemaSource + ?Sized>(
    schema: &S,
    command: GenerateCommand,
    out: &mut dyn Write,
) -> anyhow::Result<Option<PathBuf>> {
    match command {
        GenerateCommand::Single(args) => run_single(schema, args, out),
        GenerateCommand::Multi(args) => run_multi(schema, args, out),
    }
}

fn run_single<S: SchemaSource + ?Sized>(
    schema: &S,
    args: SingleArgs,
    out: &mut dyn Write,
) -> anyhow::Result<Option<PathBuf>> {
    let request = SingleSourceRequest::new(
        args.asset_type,
        args.pld,
        args.start_date.unwrap_or_else(today),
        args.end_date.unwrap_or_else(today),
        args.frequency,
    );
    let report = PacketGenerator::with_seed(args.output.seed).generate_single(schema, &request)?;

    let file_name = single_source_file_name(request.source_id.trim(), &request.asset_type);
    finish(report, &args.output, &file_name, out)
}

fn run_multi<S: SchemaSource + ?Sized>(
    schema: &S,
    args: MultiArgs,
    out: &mut dyn Write,
) -> anyhow::Result<Option<PathBuf>> {
    let plan = match &args.plan {
        Some(path) => load_plan(path)?,
        None => {
            if args.sources.is_empty() {
                anyhow::bail!("Select at least one asset type with --source or use --plan");
            }
            plan_from_assignments(
                args.start_date.unwrap_or_else(today),
                args.end_date.unwrap_or_else(today),
                &args.sources,
                &args.frequencies,
            )
        }
    };

    let report = PacketGenerator::with_seed(args.output.seed).generate_multi(schema, &plan)?;
    for error in &report.errors {
        writeln!(out, "Error: {error}")?;
    }
    let skipped = report.errors.len();

    let written = finish(report, &args.output, MULTI_SOURCE_FILE_NAME, out)?;
    if skipped > 0 {
        anyhow::bail!("{skipped} asset type(s) skipped because of invalid settings");
    }
    Ok(written)
}

/// Print warnings and the preview, then write the packets if there are any.
fn finish<P: Serialize>(
    report: GenerationReport<P>,
    output: &OutputOpts,
    file_name: &str,
    out: &mut dyn Write,
) -> anyhow::Result<Option<PathBuf>> {
    for warning in &report.warnings {
        writeln!(out, "Warning: {warning}")?;
    }
    let Some(first) = report.packets.first() else {
        writeln!(out, "No packets generated")?;
        return Ok(None);
    };

    if output.preview {
        writeln!(out, "{}", serde_json::to_string_pretty(first)?)?;
    }

    let path = write_packets(&output.output_dir, file_name, &report.packets)?;
    writeln!(
        out,
        "Generated {} packets, written to {}",
        report.packets.len(),
        path.display()
    )?;
    Ok(Some(path))
}

/// Write packets as a pretty-printed JSON array.
pub fn write_packets<P: Serialize>(
    dir: &Path,
    file_name: &str,
    packets: &[P],
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {dir:?}"))?;
    let path = dir.join(file_name);
    let json = to_pretty_json(packets)?;
    std::fs::write(&path, &json).with_context(|| format!("Failed to write {path:?}"))?;
    tracing::debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use packet_generator::{EnvelopePacket, FlatPacket};
    use telemetry_core::{Catalog, DataPoint, DataPointDraft, DataType};
    use tempfile::TempDir;

    fn date(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 1, d)
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::with_asset_types(["HVAC", "DG", "Temp Sensor"]);
        catalog.data_points.push(DataPoint::from_draft(
            1,
            DataPointDraft::new("Supply Temp", DataType::Float)
                .with_identifiers(["sup_t"])
                .with_asset_types(["HVAC"])
                .with_range(Some(12.0), Some(18.0)),
        ));
        catalog.data_points.push(DataPoint::from_draft(
            2,
            DataPointDraft::new("Running", DataType::Boolean).with_asset_types(["DG", "HVAC"]),
        ));
        catalog
    }

    fn output(dir: &Path) -> OutputOpts {
        OutputOpts {
            output_dir: dir.to_path_buf(),
            seed: Some(42),
            preview: false,
        }
    }

    fn single(dir: &Path, asset_type: &str) -> GenerateCommand {
        GenerateCommand::Single(SingleArgs {
            asset_type: asset_type.to_string(),
            pld: "PLD-001".to_string(),
            start_date: date(1),
            end_date: date(1),
            frequency: 60,
            output: output(dir),
        })
    }

    fn multi(dir: &Path, sources: &[&str], frequencies: &[&str]) -> GenerateCommand {
        GenerateCommand::Multi(MultiArgs {
            plan: None,
            start_date: date(1),
            end_date: date(1),
            sources: sources
                .iter()
                .map(|s| parse_source_assignment(s).unwrap())
                .collect(),
            frequencies: frequencies
                .iter()
                .map(|f| parse_frequency_assignment(f).unwrap())
                .collect(),
            output: output(dir),
        })
    }

    #[test]
    fn test_single_writes_named_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut out: Vec<u8> = Vec::new();
        let path = run_generate(&catalog(), single(temp_dir.path(), "HVAC"), &mut out)
            .unwrap()
            .unwrap();

        assert_eq!(path, temp_dir.path().join("PLD-001_HVAC_data.json"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n    {"));
        let packets: Vec<EnvelopePacket> = serde_json::from_str(&text).unwrap();
        assert_eq!(packets.len(), 24);
        assert_eq!(packets[23].seqid, 24);
        assert!(String::from_utf8(out).unwrap().contains("Generated 24 packets"));
    }

    #[test]
    fn test_single_without_data_points_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut out: Vec<u8> = Vec::new();
        let written = run_generate(&catalog(), single(temp_dir.path(), "Temp Sensor"), &mut out)
            .unwrap();

        assert!(written.is_none());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Warning: No data points found for asset type 'Temp Sensor'"));
        assert!(printed.contains("No packets generated"));
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_single_invalid_request_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = run_generate(&catalog(), single(temp_dir.path(), "Chiller"), &mut Vec::<u8>::new())
            .unwrap_err();
        assert!(format!("{err:#}").contains("Asset type 'Chiller' is not valid"));
    }

    #[test]
    fn test_multi_merges_and_writes() {
        let temp_dir = TempDir::new().unwrap();
        let mut out: Vec<u8> = Vec::new();
        let path = run_generate(
            &catalog(),
            multi(temp_dir.path(), &["HVAC=PLD-1,PLD-2", "DG=PLD-9"], &["HVAC=30"]),
            &mut out,
        )
        .unwrap()
        .unwrap();

        assert_eq!(path.file_name().unwrap(), MULTI_SOURCE_FILE_NAME);
        let packets: Vec<FlatPacket> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        // HVAC every 30 minutes: 86340 / 1800 = 47 per source; DG hourly: 23
        assert_eq!(packets.len(), 47 * 2 + 23);
        assert!(packets.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_multi_with_errors_writes_then_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut out: Vec<u8> = Vec::new();
        let err = run_generate(
            &catalog(),
            multi(temp_dir.path(), &["DG=PLD-9", "Chiller=PLD-1"], &[]),
            &mut out,
        )
        .unwrap_err();

        assert!(err.to_string().contains("1 asset type(s) skipped"));
        assert!(temp_dir.path().join(MULTI_SOURCE_FILE_NAME).exists());
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Error: Chiller: Asset type 'Chiller' is not valid"));
    }

    #[test]
    fn test_multi_requires_sources() {
        let temp_dir = TempDir::new().unwrap();
        let err = run_generate(&catalog(), multi(temp_dir.path(), &[], &[]), &mut Vec::<u8>::new())
            .unwrap_err();
        assert!(err.to_string().contains("--source"));
    }

    #[test]
    fn test_preview_prints_first_packet() {
        let temp_dir = TempDir::new().unwrap();
        let mut command = single(temp_dir.path(), "DG");
        if let GenerateCommand::Single(args) = &mut command {
            args.output.preview = true;
        }
        let mut out: Vec<u8> = Vec::new();
        run_generate(&catalog(), command, &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("\"seqid\": 1"));
    }
}
