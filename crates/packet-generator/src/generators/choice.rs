//! Boolean and enumerated string generators.

use rand::seq::SliceRandom;
use rand::Rng;
use telemetry_core::SampleValue;

/// Generate `true` or `false` with equal probability.
pub fn generate_bool<R: Rng>(rng: &mut R) -> SampleValue {
    SampleValue::Bool(rng.gen_bool(0.5))
}

/// Pick one of the comma-separated options, trimmed.
///
/// Every comma-separated segment counts as an option, including blank
/// ones, so `"a,,b"` can yield an empty string.
pub fn generate_one_of<R: Rng>(rng: &mut R, options: &str) -> SampleValue {
    let candidates: Vec<&str> = options.split(',').map(str::trim).collect();
    let picked = candidates.choose(rng).copied().unwrap_or_default();
    SampleValue::Text(picked.to_string())
}
