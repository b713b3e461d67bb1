// Analysis module - crack/noise analysis pipeline
//
// Pipeline: WavDecoder -> PowerEstimator -> FeatureExtractor -> Classifier
//
// Short-circuit exits:
// 1. No samples decoded        -> (0.0, -100.0, 0.0, NOISE, 0.0)
// 2. power_db < -50            -> (0.0, power_db, 0.0, NOISE, 0.5)
// 3. otherwise estimate frequency + flatness and classify
//
// Any error or panic inside the pipeline is converted to the fallback record
// at a single boundary (`Analyzer::guarded`); callers always get all five
// fields.

pub mod classifier;
pub mod features;
pub mod result;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::wav::{decode_wav, DecodedAudio};
use crate::error::{log_analysis_error, AnalysisError};

pub use classifier::{Classifier, RuleSet, CLASSIFIER_WEAK_SIGNAL_DB};
pub use features::{FeatureExtractor, Features, FlatnessEstimator, FrequencyEstimator};
pub use result::{AnalysisResult, NoiseStatus};

/// Pre-classification gate; stricter than the classifier's own -40 dB branch
pub const WEAK_SIGNAL_GATE_DB: f64 = -50.0;

/// Estimator family, paired with its classifier rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorStrategy {
    /// FFT peak + spectral flatness + scored rules
    #[default]
    Spectral,
    /// Autocorrelation + variance proxy + indicator-count rules
    Temporal,
}

impl EstimatorStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimatorStrategy::Spectral => "spectral",
            EstimatorStrategy::Temporal => "temporal",
        }
    }

    pub fn feature_extractor(&self) -> FeatureExtractor {
        match self {
            EstimatorStrategy::Spectral => FeatureExtractor::spectral(),
            EstimatorStrategy::Temporal => FeatureExtractor::temporal(),
        }
    }

    pub fn rule_set(&self) -> RuleSet {
        match self {
            EstimatorStrategy::Spectral => RuleSet::Scored,
            EstimatorStrategy::Temporal => RuleSet::IndicatorCount,
        }
    }
}

/// Analyzer runs the full pipeline for one clip per call
///
/// Holds only the estimator/rule-set wiring, so a single instance can be
/// shared across threads; every call owns its own sample buffer.
#[derive(Debug)]
pub struct Analyzer {
    extractor: FeatureExtractor,
    classifier: Classifier,
}

impl Analyzer {
    /// Create an analyzer for one estimator strategy
    pub fn new(strategy: EstimatorStrategy) -> Self {
        Self::with_parts(
            strategy.feature_extractor(),
            Classifier::new(strategy.rule_set()),
        )
    }

    /// Create an analyzer from explicitly chosen components
    pub fn with_parts(extractor: FeatureExtractor, classifier: Classifier) -> Self {
        Self {
            extractor,
            classifier,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Analyze a WAV file
    ///
    /// Never fails: unreadable or unsupported files produce the empty-signal
    /// record, and any internal failure produces [`AnalysisResult::FALLBACK`].
    pub fn analyze<P: AsRef<Path>>(&self, path: P) -> AnalysisResult {
        let path = path.as_ref();
        let result = self.guarded("analyze", || {
            let audio = decode_wav(path);
            self.run_pipeline(&audio)
        });
        tracing::info!(
            path = %path.display(),
            status = result.noise_status.as_str(),
            confidence = result.confidence,
            "[Analyzer] Analysis complete"
        );
        result
    }

    /// Analyze samples that were already decoded
    pub fn analyze_audio(&self, audio: &DecodedAudio) -> AnalysisResult {
        self.guarded("analyze_audio", || self.run_pipeline(audio))
    }

    fn guarded<F>(&self, context: &str, pipeline: F) -> AnalysisResult
    where
        F: FnOnce() -> Result<AnalysisResult, AnalysisError>,
    {
        let outcome = panic::catch_unwind(AssertUnwindSafe(pipeline)).unwrap_or_else(|payload| {
            Err(AnalysisError::Panicked {
                reason: panic_reason(&*payload),
            })
        });

        match outcome {
            Ok(result) => result,
            Err(err) => {
                log_analysis_error(&err, context);
                AnalysisResult::fallback()
            }
        }
    }

    fn run_pipeline(&self, audio: &DecodedAudio) -> Result<AnalysisResult, AnalysisError> {
        if audio.is_empty() {
            tracing::debug!("[Analyzer] No samples decoded");
            return Ok(AnalysisResult::empty_signal());
        }
        if audio.sample_rate == 0 {
            return Err(AnalysisError::InvalidSampleRate {
                sample_rate: audio.sample_rate,
            });
        }

        let power_db = ensure_finite("power", features::power_db(&audio.samples))?;
        if power_db < WEAK_SIGNAL_GATE_DB {
            tracing::debug!(power_db, "[Analyzer] Weak signal, skipping classification");
            return Ok(AnalysisResult::weak_signal(power_db));
        }

        let features = self
            .extractor
            .extract(&audio.samples, audio.sample_rate, power_db);
        ensure_finite("frequency", features.frequency)?;
        ensure_finite("surface_tension", features.surface_tension)?;

        let (status, confidence) = self.classifier.classify(&features);
        Ok(AnalysisResult::from_features(&features, status, confidence))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(EstimatorStrategy::default())
    }
}

/// Analyze a WAV file with the default (spectral) strategy
pub fn analyze<P: AsRef<Path>>(path: P) -> AnalysisResult {
    Analyzer::default().analyze(path)
}

fn ensure_finite(feature: &'static str, value: f64) -> Result<f64, AnalysisError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::NonFiniteFeature { feature, value })
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
