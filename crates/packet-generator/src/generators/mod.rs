//! Value generators for each data type.
//!
//! This module picks the generation logic for a data point based on its
//! declared type and constraints. Generation never fails: absent or
//! unusable bounds fall back to the defaults below.

pub mod choice;
pub mod numeric;

use rand::Rng;
use telemetry_core::{DataPoint, DataType, SampleValue};

/// Lower bound used when a numeric point has none.
pub const DEFAULT_RANGE_MIN: f64 = 0.0;

/// Upper bound used when a numeric point has none.
pub const DEFAULT_RANGE_MAX: f64 = 100.0;

/// Value returned for string points without options.
pub const FALLBACK_STRING: &str = "Sample String";

/// Synthesize one value for the given data point.
pub fn synthesize<R: Rng>(dp: &DataPoint, rng: &mut R) -> SampleValue {
    match dp.data_type {
        DataType::Float => {
            let (min, max) = bounds(dp);
            numeric::generate_float_cents(rng, min, max)
        }
        DataType::Int => {
            let (min, max) = bounds(dp);
            numeric::generate_int_range(rng, min.floor() as i64, max.floor() as i64)
        }
        DataType::Boolean => choice::generate_bool(rng),
        DataType::String => match dp.string_options.as_deref() {
            Some(options) if !options.is_empty() => choice::generate_one_of(rng, options),
            _ => SampleValue::Text(FALLBACK_STRING.to_string()),
        },
    }
}

fn bounds(dp: &DataPoint) -> (f64, f64) {
    (
        finite_or(dp.range_min, DEFAULT_RANGE_MIN),
        finite_or(dp.range_max, DEFAULT_RANGE_MAX),
    )
}

fn finite_or(bound: Option<f64>, default: f64) -> f64 {
    bound.filter(|b| b.is_finite()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use telemetry_core::DataPointDraft;

    fn dp(draft: DataPointDraft) -> DataPoint {
        DataPoint::from_draft(1, draft)
    }

    fn decimals(value: f64) -> usize {
        let text = value.to_string();
        text.split_once('.').map_or(0, |(_, frac)| frac.len())
    }

    #[test]
    fn test_float_respects_range_and_cents() {
        let mut rng = StdRng::seed_from_u64(42);
        let point = dp(DataPointDraft::new("Power", DataType::Float).with_range(Some(10.5), Some(20.25)));

        for _ in 0..500 {
            match synthesize(&point, &mut rng) {
                SampleValue::Float(v) => {
                    assert!((10.5..=20.25).contains(&v), "{v} out of range");
                    assert!(decimals(v) <= 2, "{v} has more than 2 decimals");
                }
                other => panic!("Expected Float, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_float_defaults_when_bounds_absent() {
        let mut rng = StdRng::seed_from_u64(7);
        let point = dp(DataPointDraft::new("Power", DataType::Float));

        for _ in 0..200 {
            let v = synthesize(&point, &mut rng).as_f64().unwrap();
            assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn test_float_with_overflowing_width() {
        let mut rng = StdRng::seed_from_u64(42);
        let point = dp(DataPointDraft::new("Wide", DataType::Float).with_range(Some(-1e308), Some(1e308)));

        for _ in 0..200 {
            let v = synthesize(&point, &mut rng).as_f64().unwrap();
            assert!((-1e308..=1e308).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn test_int_is_inclusive_and_floors_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let point = dp(DataPointDraft::new("Count", DataType::Int).with_range(Some(1.9), Some(3.7)));

        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            match synthesize(&point, &mut rng) {
                SampleValue::Int(v) => {
                    assert!((1..=3).contains(&v));
                    seen.insert(v);
                }
                other => panic!("Expected Int, got {other:?}"),
            }
        }
        assert_eq!(seen.len(), 3, "both ends of the range should be reachable");
    }

    #[test]
    fn test_int_ignores_string_options() {
        let mut rng = StdRng::seed_from_u64(1);
        let point = dp(DataPointDraft::new("Count", DataType::Int)
            .with_range(Some(5.0), Some(5.0))
            .with_string_options("a,b"));
        assert_eq!(synthesize(&point, &mut rng), SampleValue::Int(5));
    }

    #[test]
    fn test_boolean_produces_both_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let point = dp(DataPointDraft::new("Running", DataType::Boolean));

        let values: Vec<SampleValue> = (0..100).map(|_| synthesize(&point, &mut rng)).collect();
        assert!(values.contains(&SampleValue::Bool(true)));
        assert!(values.contains(&SampleValue::Bool(false)));
    }

    #[test]
    fn test_string_picks_trimmed_option() {
        let mut rng = StdRng::seed_from_u64(42);
        let point = dp(DataPointDraft::new("Mode", DataType::String).with_string_options("ON, OFF ,STANDBY"));

        for _ in 0..100 {
            let value = synthesize(&point, &mut rng);
            let text = value.as_str().unwrap();
            assert!(["ON", "OFF", "STANDBY"].contains(&text), "unexpected {text}");
        }
    }

    #[test]
    fn test_string_fallback() {
        let mut rng = StdRng::seed_from_u64(42);
        let point = dp(DataPointDraft::new("Mode", DataType::String));
        assert_eq!(
            synthesize(&point, &mut rng),
            SampleValue::Text("Sample String".to_string())
        );

        let empty = dp(DataPointDraft::new("Mode", DataType::String).with_string_options(""));
        assert_eq!(
            synthesize(&empty, &mut rng),
            SampleValue::Text("Sample String".to_string())
        );
    }

    #[test]
    fn test_deterministic_with_seed() {
        let point = dp(DataPointDraft::new("Power", DataType::Float));
        let mut rng1 = StdRng::seed_from_u64(99);
        let mut rng2 = StdRng::seed_from_u64(99);
        for _ in 0..10 {
            assert_eq!(synthesize(&point, &mut rng1), synthesize(&point, &mut rng2));
        }
    }
}
