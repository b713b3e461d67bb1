// Spectral module - Transform-domain estimators
//
// Both estimators window the whole clip (Hann), take its magnitude spectrum
// and reduce it to a single scalar. They are the preferred pair and go with
// the scored classifier rule set.
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

use super::fft::{bin_frequency, FftProcessor};
use super::{FlatnessEstimator, FrequencyEstimator, MIN_ANALYSIS_SAMPLES};

/// Bins at or below this frequency are ignored (DC and rumble)
pub const MIN_PEAK_FREQUENCY_HZ: f64 = 20.0;

/// Added to every magnitude before taking logs
const FLATNESS_EPSILON: f64 = 1e-10;

/// Dominant frequency as the highest-magnitude FFT bin above 20 Hz
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectralPeakEstimator;

impl FrequencyEstimator for SpectralPeakEstimator {
    fn name(&self) -> &'static str {
        "spectral_peak"
    }

    fn dominant_frequency(&self, samples: &[f32], sample_rate: u32) -> f64 {
        if samples.len() < MIN_ANALYSIS_SAMPLES {
            return 0.0;
        }

        let spectrum = FftProcessor::new().compute_magnitude_spectrum(samples);
        let fft_len = samples.len();

        // First bin wins on ties
        let mut peak: Option<(f64, f64)> = None;
        for (bin, &magnitude) in spectrum.iter().enumerate() {
            let frequency = bin_frequency(bin, fft_len, sample_rate);
            if frequency <= MIN_PEAK_FREQUENCY_HZ {
                continue;
            }
            match peak {
                Some((_, best)) if best >= magnitude => {}
                _ => peak = Some((frequency, magnitude)),
            }
        }

        peak.map(|(frequency, _)| frequency).unwrap_or(0.0)
    }
}

/// Spectral flatness of the power spectrum (Wiener entropy)
///
/// Formula: flatness = exp(mean(ln P[k])) / mean(P[k]), P[k] = (|X[k]| + eps)^2,
/// DC bin excluded.
///
/// Returns a value in (0, 1]: 1.0 for a perfectly flat spectrum, close to 0
/// for a pure tone, exactly 0.0 for a silent spectrum.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectralFlatnessEstimator;

impl FlatnessEstimator for SpectralFlatnessEstimator {
    fn name(&self) -> &'static str {
        "spectral_flatness"
    }

    fn surface_tension(&self, samples: &[f32]) -> f64 {
        if samples.len() < MIN_ANALYSIS_SAMPLES {
            return 0.0;
        }

        let spectrum = FftProcessor::new().compute_magnitude_spectrum(samples);
        let power: Vec<f64> = spectrum
            .iter()
            .skip(1)
            .map(|&magnitude| {
                let shifted = magnitude + FLATNESS_EPSILON;
                shifted * shifted
            })
            .collect();

        if power.is_empty() {
            return 0.0;
        }

        let count = power.len() as f64;
        let log_mean = power.iter().map(|p| p.ln()).sum::<f64>() / count;
        let geometric_mean = log_mean.exp();
        let arithmetic_mean = power.iter().sum::<f64>() / count;

        if arithmetic_mean < FLATNESS_EPSILON {
            return 0.0;
        }

        geometric_mean / arithmetic_mean
    }
}
