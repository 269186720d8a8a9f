//! Parsing of `ASSET_TYPE=value` command-line assignments.

use anyhow::Context;
use telemetry_core::split_list;

/// Source ids for one asset type, e.g. `HVAC=PLD-1,PLD-2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAssignment {
    pub asset_type: String,
    pub source_ids: Vec<String>,
}

/// Frequency for one asset type, e.g. `HVAC=15`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyAssignment {
    pub asset_type: String,
    pub minutes: i64,
}

fn split_assignment(s: &str) -> anyhow::Result<(&str, &str)> {
    let (asset_type, value) = s
        .split_once('=')
        .with_context(|| format!("Expected ASSET_TYPE=VALUE, got '{s}'"))?;
    let asset_type = asset_type.trim();
    if asset_type.is_empty() {
        anyhow::bail!("Missing asset type in '{s}'");
    }
    Ok((asset_type, value.trim()))
}

/// Parse `ASSET_TYPE=ID[,ID...]`.
///
/// Blank ids are dropped; an assignment with none left is kept so the
/// generator can report it against its asset type.
pub fn parse_source_assignment(s: &str) -> anyhow::Result<SourceAssignment> {
    let (asset_type, ids) = split_assignment(s)?;
    Ok(SourceAssignment {
        asset_type: asset_type.to_string(),
        source_ids: split_list(ids),
    })
}

/// Parse `ASSET_TYPE=MINUTES`.
pub fn parse_frequency_assignment(s: &str) -> anyhow::Result<FrequencyAssignment> {
    let (asset_type, minutes) = split_assignment(s)?;
    let minutes = minutes
        .parse::<i64>()
        .with_context(|| format!("Invalid minutes value: {minutes}"))?;
    Ok(FrequencyAssignment {
        asset_type: asset_type.to_string(),
        minutes,
    })
}
