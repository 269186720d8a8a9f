//! Multi-source plan loading.

use super::assignment::{FrequencyAssignment, SourceAssignment};
use anyhow::Context;
use chrono::NaiveDate;
use packet_generator::MultiSourcePlan;
use std::collections::HashSet;
use std::path::Path;

/// Load a multi-source plan from a YAML file.
///
/// Each asset type may appear only once, since every entry carries its own
/// frequency.
pub fn load_plan(path: &Path) -> anyhow::Result<MultiSourcePlan> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan file: {path:?}"))?;
    let plan: MultiSourcePlan = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse plan YAML: {path:?}"))?;

    let mut seen = HashSet::new();
    for source in &plan.sources {
        if !seen.insert(source.asset_type.as_str()) {
            anyhow::bail!(
                "Asset type '{}' is listed more than once in plan {path:?}",
                source.asset_type
            );
        }
    }
    Ok(plan)
}

/// Build a plan from command-line assignments.
///
/// Asset types are selected in the order they first appear. Repeating an
/// asset type adds to its source ids; the last frequency given wins.
pub fn plan_from_assignments(
    start_date: NaiveDate,
    end_date: NaiveDate,
    sources: &[SourceAssignment],
    frequencies: &[FrequencyAssignment],
) -> MultiSourcePlan {
    let mut plan = MultiSourcePlan::new(start_date, end_date);
    for source in sources {
        let selected = plan.select(&source.asset_type);
        selected.source_ids.extend(source.source_ids.iter().cloned());
    }
    for frequency in frequencies {
        plan.set_frequency(&frequency.asset_type, frequency.minutes);
    }
    plan
}
