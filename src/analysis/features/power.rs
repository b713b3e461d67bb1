// Power module - RMS signal level in dBFS

/// Floor returned for empty or near-silent input
pub const POWER_FLOOR_DB: f64 = -100.0;

/// RMS below this is treated as silence (avoids log10(0))
const SILENCE_RMS: f64 = 1e-10;

/// Root-mean-square amplitude (0.0 for empty input)
pub fn compute_rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_squares / samples.len() as f64).sqrt()
}

/// RMS power in dBFS
///
/// Returns [`POWER_FLOOR_DB`] for empty input or RMS < 1e-10. The upper end is
/// not clamped: out-of-range samples can push the result above 0 dBFS.
pub fn power_db(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return POWER_FLOOR_DB;
    }

    let rms = compute_rms(samples);
    if rms < SILENCE_RMS {
        return POWER_FLOOR_DB;
    }

    20.0 * rms.log10()
}
