//! Multi-source generation and chronological merge.

use crate::assembler::assemble_flat;
use crate::generator::{
    GenerationError, GenerationReport, GenerationWarning, PacketGenerator, UnitError,
};
use crate::packet::FlatPacket;
use crate::request::MultiSourcePlan;
use telemetry_core::{DataPoint, SchemaSource};
use tracing::{debug, error, info, warn};

impl PacketGenerator {
    /// Generate flat packets for every asset type and source id in the plan,
    /// merged into one stream ordered by timestamp.
    ///
    /// An invalid date window rejects the whole plan. Problems with a single
    /// asset type only skip that asset type: invalid settings are recorded
    /// in [`GenerationReport::errors`], a missing set of data points in
    /// [`GenerationReport::warnings`].
    pub fn generate_multi<S: SchemaSource + ?Sized>(
        &mut self,
        schema: &S,
        plan: &MultiSourcePlan,
    ) -> Result<GenerationReport<FlatPacket>, GenerationError> {
        let window = plan.window()?;
        let mut report = GenerationReport::default();

        for source in &plan.sources {
            let (source_ids, frequency) = match source.validate(schema) {
                Ok(valid) => valid,
                Err(err) => {
                    let unit = UnitError {
                        asset_type: source.asset_type.clone(),
                        error: err,
                    };
                    error!("Skipping asset type: {unit}");
                    report.errors.push(unit);
                    continue;
                }
            };

            let points: Vec<&DataPoint> = schema.data_points_by_asset_type(&source.asset_type);
            if points.is_empty() {
                let warning = GenerationWarning::NoDataPoints {
                    asset_type: source.asset_type.clone(),
                };
                warn!("{warning}. Skipping.");
                report.warnings.push(warning);
                continue;
            }

            let ticks = window.even_distribution(frequency);
            debug!(
                "Asset type '{}': {} sources x {} packets every {} minutes",
                source.asset_type,
                source_ids.len(),
                ticks.len(),
                frequency.minutes()
            );

            for source_id in &source_ids {
                for at in ticks.clone() {
                    report.packets.push(assemble_flat(
                        &source.asset_type,
                        source_id,
                        at,
                        &points,
                        &mut self.rng,
                    ));
                }
            }
        }

        // fixed-width timestamps with one offset sort chronologically as text
        report.packets.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        info!(
            "Generated {} mixed packets ({} asset types skipped with errors, {} with warnings)",
            report.packets.len(),
            report.errors.len(),
            report.warnings.len()
        );
        Ok(report)
    }
}
