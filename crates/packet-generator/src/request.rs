//! Generation requests for both modes.
//!
//! A [`MultiSourcePlan`] is built up incrementally (asset types, their
//! source ids and frequencies), validated per asset type, handed to
//! [`PacketGenerator::generate_multi`](crate::PacketGenerator::generate_multi)
//! and then dropped. It can also be loaded from YAML:
//!
//! ```yaml
//! start_date: 2024-01-01
//! end_date: 2024-01-02
//! sources:
//!   - asset_type: HVAC
//!     frequency_minutes: 15
//!     source_ids: [PLD-001, PLD-002]
//!   - asset_type: DG
//!     source_ids: [PLD-100]
//! ```

use crate::sequencer::{Frequency, Window};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use telemetry_core::{SchemaSource, ValidationError};

/// Upper bound on the single-source frequency, in minutes.
pub const MAX_SINGLE_SOURCE_FREQUENCY: i64 = 60;

/// Frequency used for an asset type in a plan that does not set one.
pub const DEFAULT_PLAN_FREQUENCY: i64 = 60;

/// Single-source generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleSourceRequest {
    pub asset_type: String,
    pub source_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub frequency_minutes: i64,
}

impl SingleSourceRequest {
    pub fn new(
        asset_type: impl Into<String>,
        source_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        frequency_minutes: i64,
    ) -> Self {
        Self {
            asset_type: asset_type.into(),
            source_id: source_id.into(),
            start_date,
            end_date,
            frequency_minutes,
        }
    }

    /// Check the request against the schema; any error blocks the whole run.
    pub fn validate<S: SchemaSource + ?Sized>(
        &self,
        schema: &S,
    ) -> Result<(Window, Frequency), ValidationError> {
        if self.source_id.trim().is_empty() {
            return Err(ValidationError::MissingField("PLD ID"));
        }
        if !schema.has_asset_type(&self.asset_type) {
            return Err(ValidationError::UnknownAssetType(self.asset_type.clone()));
        }
        let window = Window::checked_days(self.start_date, self.end_date)?;
        let frequency = Frequency::from_minutes(self.frequency_minutes)?;
        if self.frequency_minutes > MAX_SINGLE_SOURCE_FREQUENCY {
            return Err(ValidationError::FrequencyTooLarge {
                value: self.frequency_minutes,
                max: MAX_SINGLE_SOURCE_FREQUENCY,
            });
        }
        Ok((window, frequency))
    }
}

/// Per-asset-type part of a multi-source plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePlan {
    pub asset_type: String,

    #[serde(default = "default_plan_frequency")]
    pub frequency_minutes: i64,

    #[serde(default)]
    pub source_ids: Vec<String>,
}

fn default_plan_frequency() -> i64 {
    DEFAULT_PLAN_FREQUENCY
}

impl SourcePlan {
    pub fn new(asset_type: impl Into<String>) -> Self {
        Self {
            asset_type: asset_type.into(),
            frequency_minutes: DEFAULT_PLAN_FREQUENCY,
            source_ids: Vec::new(),
        }
    }

    /// Source ids with surrounding whitespace removed and blanks dropped.
    pub fn cleaned_source_ids(&self) -> Vec<String> {
        self.source_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Validate this asset type's settings.
    ///
    /// Returns the cleaned source ids and the frequency.
    pub fn validate<S: SchemaSource + ?Sized>(
        &self,
        schema: &S,
    ) -> Result<(Vec<String>, Frequency), ValidationError> {
        if !schema.has_asset_type(&self.asset_type) {
            return Err(ValidationError::UnknownAssetType(self.asset_type.clone()));
        }
        let source_ids = self.cleaned_source_ids();
        if source_ids.is_empty() {
            return Err(ValidationError::NoSourceIds(self.asset_type.clone()));
        }
        let frequency = Frequency::from_minutes(self.frequency_minutes)?;
        Ok((source_ids, frequency))
    }
}

/// Multi-source generation plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiSourcePlan {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default)]
    pub sources: Vec<SourcePlan>,
}

impl MultiSourcePlan {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            sources: Vec::new(),
        }
    }

    /// Select an asset type; selecting it again is a no-op.
    pub fn select(&mut self, asset_type: &str) -> &mut SourcePlan {
        let idx = match self.sources.iter().position(|s| s.asset_type == asset_type) {
            Some(idx) => idx,
            None => {
                self.sources.push(SourcePlan::new(asset_type));
                self.sources.len() - 1
            }
        };
        &mut self.sources[idx]
    }

    /// Add a source id under an asset type, selecting it if needed.
    pub fn add_source_id(&mut self, asset_type: &str, source_id: impl Into<String>) -> &mut Self {
        self.select(asset_type).source_ids.push(source_id.into());
        self
    }

    /// Set an asset type's frequency, selecting it if needed.
    pub fn set_frequency(&mut self, asset_type: &str, minutes: i64) -> &mut Self {
        self.select(asset_type).frequency_minutes = minutes;
        self
    }

    /// Validate the shared window; per asset type checks happen during generation.
    pub fn window(&self) -> Result<Window, ValidationError> {
        Window::checked_days(self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use telemetry_core::Catalog;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::with_asset_types(["HVAC", "DG"])
    }

    #[test]
    fn test_single_request_valid() {
        let request = SingleSourceRequest::new("HVAC", "PLD-1", date(1), date(2), 5);
        let (window, frequency) = request.validate(&catalog()).unwrap();
        assert_eq!(frequency.minutes(), 5);
        assert_eq!(window.start.to_string(), "2024-01-01 00:00:00");
    }

    #[test]
    fn test_single_request_errors() {
        let schema = catalog();

        let blank = SingleSourceRequest::new("HVAC", "  ", date(1), date(1), 5);
        assert_eq!(
            blank.validate(&schema),
            Err(ValidationError::MissingField("PLD ID"))
        );

        let unknown = SingleSourceRequest::new("Chiller", "P", date(1), date(1), 5);
        assert_eq!(
            unknown.validate(&schema),
            Err(ValidationError::UnknownAssetType("Chiller".to_string()))
        );

        let reversed = SingleSourceRequest::new("HVAC", "P", date(2), date(1), 5);
        assert!(matches!(
            reversed.validate(&schema),
            Err(ValidationError::InvalidDateRange { .. })
        ));

        let zero = SingleSourceRequest::new("HVAC", "P", date(1), date(1), 0);
        assert_eq!(
            zero.validate(&schema),
            Err(ValidationError::NonPositiveFrequency(0))
        );

        let slow = SingleSourceRequest::new("HVAC", "P", date(1), date(1), 61);
        assert_eq!(
            slow.validate(&schema),
            Err(ValidationError::FrequencyTooLarge { value: 61, max: 60 })
        );
    }

    #[test]
    fn test_plan_accumulates_per_asset_type() {
        let mut plan = MultiSourcePlan::new(date(1), date(1));
        plan.add_source_id("HVAC", "PLD-1")
            .add_source_id("DG", "PLD-9")
            .add_source_id("HVAC", "PLD-2")
            .set_frequency("HVAC", 15);

        assert_eq!(plan.sources.len(), 2);
        assert_eq!(plan.sources[0].source_ids, vec!["PLD-1", "PLD-2"]);
        assert_eq!(plan.sources[0].frequency_minutes, 15);
        assert_eq!(plan.sources[1].frequency_minutes, DEFAULT_PLAN_FREQUENCY);
    }

    #[test]
    fn test_source_plan_validation() {
        let schema = catalog();

        let mut blank = SourcePlan::new("HVAC");
        blank.source_ids = vec!["".to_string(), "   ".to_string()];
        assert_eq!(
            blank.validate(&schema),
            Err(ValidationError::NoSourceIds("HVAC".to_string()))
        );

        let mut ok = SourcePlan::new("DG");
        ok.source_ids = vec![" PLD-1 ".to_string(), "".to_string()];
        let (ids, freq) = ok.validate(&schema).unwrap();
        assert_eq!(ids, vec!["PLD-1"]);
        assert_eq!(freq.minutes(), 60);

        let mut negative = SourcePlan::new("DG");
        negative.source_ids = vec!["P".to_string()];
        negative.frequency_minutes = -1;
        assert_eq!(
            negative.validate(&schema),
            Err(ValidationError::NonPositiveFrequency(-1))
        );
    }

    #[test]
    fn test_plan_from_yaml() {
        let yaml = r#"
start_date: 2024-01-01
end_date: 2024-01-02
sources:
  - asset_type: HVAC
    frequency_minutes: 15
    source_ids: [PLD-001, PLD-002]
  - asset_type: DG
    source_ids: [PLD-100]
"#;
        let plan: MultiSourcePlan = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(plan.start_date, date(1));
        assert_eq!(plan.end_date, date(2));
        assert_eq!(plan.sources[0].frequency_minutes, 15);
        assert_eq!(plan.sources[1].frequency_minutes, 60);
        assert_eq!(plan.sources[1].source_ids, vec!["PLD-100"]);
    }
}
