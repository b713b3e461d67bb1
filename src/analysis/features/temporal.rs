// Temporal module - Time-domain estimators
//
// Transform-free stand-ins for the spectral pair. Cheaper and cruder; they go
// with the indicator-count classifier rule set.

use super::{FlatnessEstimator, FrequencyEstimator, MIN_ANALYSIS_SAMPLES};

/// Only this many leading samples are autocorrelated
pub const AUTOCORRELATION_WINDOW: usize = 8_192;

/// Smallest lag searched (caps the estimate at sample_rate / 20)
pub const MIN_LAG: usize = 20;

/// Largest lag searched, further capped at half the window
pub const MAX_LAG: usize = 2_000;

/// Dominant frequency from the autocorrelation peak
///
/// Searches lags in `[MIN_LAG, min(MAX_LAG, window / 2))` for the largest
/// unnormalized autocorrelation. Only a strict improvement moves the best
/// lag, so ties keep the lowest lag. Cost is O(window * max_lag).
#[derive(Debug, Clone, Copy, Default)]
pub struct AutocorrelationEstimator;

impl AutocorrelationEstimator {
    /// Lag with the highest positive autocorrelation, if any
    pub fn best_lag(&self, samples: &[f32]) -> Option<usize> {
        let window = &samples[..samples.len().min(AUTOCORRELATION_WINDOW)];
        let max_lag = MAX_LAG.min(window.len() / 2);

        let mut best_lag = None;
        let mut best_correlation = 0.0f64;
        for lag in MIN_LAG..max_lag {
            let correlation: f64 = window[..window.len() - lag]
                .iter()
                .zip(&window[lag..])
                .map(|(&a, &b)| a as f64 * b as f64)
                .sum();
            if correlation > best_correlation {
                best_correlation = correlation;
                best_lag = Some(lag);
            }
        }
        best_lag
    }
}

impl FrequencyEstimator for AutocorrelationEstimator {
    fn name(&self) -> &'static str {
        "autocorrelation"
    }

    fn dominant_frequency(&self, samples: &[f32], sample_rate: u32) -> f64 {
        if samples.len() < MIN_ANALYSIS_SAMPLES {
            return 0.0;
        }

        match self.best_lag(samples) {
            Some(lag) => sample_rate as f64 / lag as f64,
            None => 0.0,
        }
    }
}

/// Variance proxy for flatness: min(1, 10 * stddev)
///
/// No spectral meaning; only used when the transform path is not selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct VarianceFlatnessEstimator;

impl FlatnessEstimator for VarianceFlatnessEstimator {
    fn name(&self) -> &'static str {
        "variance_proxy"
    }

    fn surface_tension(&self, samples: &[f32]) -> f64 {
        if samples.len() < MIN_ANALYSIS_SAMPLES {
            return 0.0;
        }

        let count = samples.len() as f64;
        let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / count;
        let variance = samples
            .iter()
            .map(|&s| {
                let delta = s as f64 - mean;
                delta * delta
            })
            .sum::<f64>()
            / count;

        (variance.sqrt() * 10.0).min(1.0)
    }
}
