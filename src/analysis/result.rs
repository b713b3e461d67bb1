// Result types - the five-field record returned for every clip

use serde::{Deserialize, Serialize};
use std::fmt;

use super::features::{Features, POWER_FLOOR_DB};

/// Acoustic category of a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NoiseStatus {
    /// Crack-like transient
    Crack,
    /// Benign sound
    Normal,
    /// Unusable input (too quiet, empty, or failed analysis)
    Noise,
}

impl NoiseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseStatus::Crack => "CRACK",
            NoiseStatus::Normal => "NORMAL",
            NoiseStatus::Noise => "NOISE",
        }
    }
}

impl fmt::Display for NoiseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of analyzing one clip
///
/// All five fields are populated on every path, including failures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Dominant frequency in Hz
    pub frequency: f64,
    /// RMS power in dBFS
    pub power: f64,
    /// Spectral flatness metric
    pub surface_tension: f64,
    pub noise_status: NoiseStatus,
    /// Classification confidence (0.0-1.0)
    pub confidence: f64,
}

impl AnalysisResult {
    /// Universal fallback: (0.0, -100.0, 0.0, NOISE, 0.0)
    pub const FALLBACK: AnalysisResult = AnalysisResult {
        frequency: 0.0,
        power: POWER_FLOOR_DB,
        surface_tension: 0.0,
        noise_status: NoiseStatus::Noise,
        confidence: 0.0,
    };

    /// Returned when no reliable analysis could be performed
    pub fn fallback() -> Self {
        Self::FALLBACK
    }

    /// Returned when the decoder produced no samples
    pub fn empty_signal() -> Self {
        Self::FALLBACK
    }

    /// Returned when the clip is below the pre-classification power gate
    pub fn weak_signal(power_db: f64) -> Self {
        Self {
            frequency: 0.0,
            power: power_db,
            surface_tension: 0.0,
            noise_status: NoiseStatus::Noise,
            confidence: 0.5,
        }
    }

    pub fn from_features(features: &Features, noise_status: NoiseStatus, confidence: f64) -> Self {
        Self {
            frequency: features.frequency,
            power: features.power_db,
            surface_tension: features.surface_tension,
            noise_status,
            confidence,
        }
    }
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self::FALLBACK
    }
}
