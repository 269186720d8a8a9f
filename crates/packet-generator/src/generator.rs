//! Main packet generator and the single-source run.

use crate::assembler::assemble_envelope;
use crate::packet::EnvelopePacket;
use crate::request::SingleSourceRequest;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use telemetry_core::{DataPoint, SchemaSource, ValidationError};
use tracing::{debug, info, warn};

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Request rejected before any packet was built
    #[error("Invalid generation request: {0}")]
    Validation(#[from] ValidationError),
}

/// Non-fatal condition reported alongside generated packets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationWarning {
    /// The asset type exists but no data point applies to it
    NoDataPoints { asset_type: String },
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationWarning::NoDataPoints { asset_type } => {
                write!(f, "No data points found for asset type '{asset_type}'")
            }
        }
    }
}

/// Validation failure scoped to one asset type of a multi-source plan.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitError {
    pub asset_type: String,
    pub error: ValidationError,
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.asset_type, self.error)
    }
}

/// Packets produced by one run, with whatever was skipped along the way.
#[derive(Debug, Clone)]
pub struct GenerationReport<P> {
    pub packets: Vec<P>,
    pub warnings: Vec<GenerationWarning>,
    pub errors: Vec<UnitError>,
}

impl<P> Default for GenerationReport<P> {
    fn default() -> Self {
        Self {
            packets: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<P> GenerationReport<P> {
    /// Whether any asset type was skipped because of invalid settings.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Packet generator.
///
/// Timestamps are fully determined by the request; values come from the
/// generator's RNG, so two generators built with the same seed produce
/// identical output for identical input.
pub struct PacketGenerator {
    pub(crate) rng: StdRng,
}

impl PacketGenerator {
    /// Create a generator with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, entropy-seeded otherwise.
    pub fn with_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Generate envelope packets for one asset type and one source id.
    ///
    /// Timestamps step by the requested frequency from midnight of the start
    /// date up to 23:59 of the end date. `seqid` starts at 1 for every call.
    pub fn generate_single<S: SchemaSource + ?Sized>(
        &mut self,
        schema: &S,
        request: &SingleSourceRequest,
    ) -> Result<GenerationReport<EnvelopePacket>, GenerationError> {
        let (window, frequency) = request.validate(schema)?;
        let mut report = GenerationReport::default();

        let points: Vec<&DataPoint> = schema.data_points_by_asset_type(&request.asset_type);
        if points.is_empty() {
            let warning = GenerationWarning::NoDataPoints {
                asset_type: request.asset_type.clone(),
            };
            warn!("{warning}");
            report.warnings.push(warning);
            return Ok(report);
        }

        debug!(
            "Generating packets for {} ('{}') from {} data points every {} minutes",
            request.source_id,
            request.asset_type,
            points.len(),
            frequency.minutes()
        );

        let source_id = request.source_id.trim();
        report.packets = window
            .fixed_interval(frequency)
            .zip(1u64..)
            .map(|(at, seqid)| assemble_envelope(source_id, at, seqid, &points, &mut self.rng))
            .collect();

        info!(
            "Generated {} packets for {} ({})",
            report.packets.len(),
            source_id,
            request.asset_type
        );
        Ok(report)
    }
}
