//! Numeric value generators.

use rand::Rng;
use telemetry_core::SampleValue;

/// Generate a random integer in the given range (inclusive).
///
/// Reversed bounds are swapped rather than rejected.
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> SampleValue {
    let (low, high) = ordered(min, max);
    SampleValue::Int(rng.gen_range(low..=high))
}

/// Generate a random float in the given range, rounded to 2 decimal places.
///
/// The rounded value is kept inside `[min, max]`.
pub fn generate_float_cents<R: Rng>(rng: &mut R, min: f64, max: f64) -> SampleValue {
    let (low, high) = ordered(min, max);
    let value = if (high - low).is_finite() {
        rng.gen_range(low..=high)
    } else {
        // width overflows f64; blend the bounds instead
        let t: f64 = rng.gen();
        low * (1.0 - t) + high * t
    };
    SampleValue::Float(round_cents_within(value, low, high))
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Round to 2 decimal places.
///
/// Values too large to scale are returned unchanged; they carry no
/// fractional part anyway.
pub fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

fn round_cents_within(value: f64, low: f64, high: f64) -> f64 {
    let rounded = round_cents(value);
    let nudged = if rounded < low {
        (low * 100.0).ceil() / 100.0
    } else if rounded > high {
        (high * 100.0).floor() / 100.0
    } else {
        rounded
    };
    // a range narrower than one cent has no 2-decimal value inside it
    nudged.clamp(low, high)
}
