// FeatureExtractor - scalar features for crack/noise classification
//
// Module organization:
// - types: Data structures (Features struct)
// - fft: FFT computation with Hann windowing
// - power: RMS power in dBFS
// - spectral: Transform-domain estimators (peak frequency, spectral flatness)
// - temporal: Time-domain estimators (autocorrelation, variance proxy)
// - mod.rs: Estimator traits and the FeatureExtractor coordinator
//
// Frequency and flatness each have two interchangeable implementations behind
// a common trait, so the pipeline is written once and the strategy is picked
// by whoever builds the FeatureExtractor.

mod fft;
mod power;
mod spectral;
mod temporal;
mod types;

pub use fft::{bin_frequency, hann_window, FftProcessor};
pub use power::{compute_rms, power_db, POWER_FLOOR_DB};
pub use spectral::{SpectralFlatnessEstimator, SpectralPeakEstimator, MIN_PEAK_FREQUENCY_HZ};
pub use temporal::{
    AutocorrelationEstimator, VarianceFlatnessEstimator, AUTOCORRELATION_WINDOW, MAX_LAG, MIN_LAG,
};
pub use types::Features;

/// Estimators return 0.0 for clips shorter than this
pub const MIN_ANALYSIS_SAMPLES: usize = 100;

/// Dominant-frequency estimation strategy
pub trait FrequencyEstimator: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Dominant frequency in Hz, 0.0 if fewer than 100 samples or no estimate
    fn dominant_frequency(&self, samples: &[f32], sample_rate: u32) -> f64;
}

/// Flatness ("surface tension") estimation strategy
pub trait FlatnessEstimator: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Surface tension, roughly in [0, 1]; 0.0 if fewer than 100 samples
    fn surface_tension(&self, samples: &[f32]) -> f64;
}

/// FeatureExtractor pairs one frequency and one flatness estimator
pub struct FeatureExtractor {
    frequency: Box<dyn FrequencyEstimator>,
    flatness: Box<dyn FlatnessEstimator>,
}

impl FeatureExtractor {
    pub fn new(
        frequency: Box<dyn FrequencyEstimator>,
        flatness: Box<dyn FlatnessEstimator>,
    ) -> Self {
        Self {
            frequency,
            flatness,
        }
    }

    /// Transform-domain pair (peak picking + spectral flatness)
    pub fn spectral() -> Self {
        Self::new(
            Box::new(SpectralPeakEstimator),
            Box::new(SpectralFlatnessEstimator),
        )
    }

    /// Time-domain pair (autocorrelation + variance proxy)
    pub fn temporal() -> Self {
        Self::new(
            Box::new(AutocorrelationEstimator),
            Box::new(VarianceFlatnessEstimator),
        )
    }

    pub fn frequency_estimator(&self) -> &dyn FrequencyEstimator {
        self.frequency.as_ref()
    }

    pub fn flatness_estimator(&self) -> &dyn FlatnessEstimator {
        self.flatness.as_ref()
    }

    /// Extract classifier features from a clip whose power is already known
    pub fn extract(&self, samples: &[f32], sample_rate: u32, power_db: f64) -> Features {
        let frequency = self.frequency.dominant_frequency(samples, sample_rate);
        let surface_tension = self.flatness.surface_tension(samples);

        tracing::debug!(
            frequency_estimator = self.frequency.name(),
            flatness_estimator = self.flatness.name(),
            frequency,
            power_db,
            surface_tension,
            "[FeatureExtractor] Extracted features"
        );

        Features {
            frequency,
            power_db,
            surface_tension,
        }
    }
}

impl std::fmt::Debug for FeatureExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureExtractor")
            .field("frequency", &self.frequency.name())
            .field("flatness", &self.flatness.name())
            .finish()
    }
}
