// Classifier - fixed rule-based crack/noise classification
//
// Fuses (frequency, power_db, surface_tension) into a label and confidence.
// Two rule sets exist because the two estimator families produce different
// output distributions:
//
// Scored:         pairs with the spectral estimators
// IndicatorCount: pairs with the time-domain estimators
//
// Every threshold is an exact constant compared with the stated operator; no
// epsilon tolerance at the boundaries. Both rule sets check power < -40 dB
// first. The pipeline's own -50 dB gate runs earlier, so that branch only
// fires for power in [-50, -40) or when the classifier is used standalone.

use serde::{Deserialize, Serialize};

use super::features::Features;
use super::result::NoiseStatus;

/// Below this power the classifier reports NOISE
pub const CLASSIFIER_WEAK_SIGNAL_DB: f64 = -40.0;

const WEAK_SIGNAL_CONFIDENCE: f64 = 0.6;

// Scored rule set
const SCORED_HIGH_FREQUENCY_HZ: f64 = 2000.0;
const SCORED_MID_FREQUENCY_HZ: f64 = 1000.0;
const SCORED_HIGH_TENSION: f64 = 0.7;
const SCORED_MID_TENSION: f64 = 0.5;
const SCORED_LOUD_DB: f64 = -15.0;
const SCORED_MODERATE_DB: f64 = -25.0;
const SCORED_CRACK_SCORE: f64 = 0.6;
const SCORED_AMBIGUOUS_SCORE: f64 = 0.3;
const SCORED_MAX_CONFIDENCE: f64 = 0.95;

// Indicator-count rule set
const INDICATOR_FREQUENCY_HZ: f64 = 1500.0;
const INDICATOR_TENSION: f64 = 0.6;
const INDICATOR_LOUD_DB: f64 = -20.0;
const INDICATOR_MAX_CONFIDENCE: f64 = 0.9;

/// Which decision rule the classifier applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSet {
    /// Weighted crack score (spectral estimators)
    #[default]
    Scored,
    /// Count of crack indicators (time-domain estimators)
    IndicatorCount,
}

/// Classifier applies one fixed rule set
///
/// Pure and deterministic; holds no state beyond the rule set choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classifier {
    rule_set: RuleSet,
}

impl Classifier {
    pub fn new(rule_set: RuleSet) -> Self {
        Self { rule_set }
    }

    pub fn rule_set(&self) -> RuleSet {
        self.rule_set
    }

    /// Classify features with the configured rule set
    ///
    /// # Returns
    /// Tuple of (NoiseStatus, confidence score 0.0-1.0)
    pub fn classify(&self, features: &Features) -> (NoiseStatus, f64) {
        let (status, confidence) = match self.rule_set {
            RuleSet::Scored => self.classify_scored(features),
            RuleSet::IndicatorCount => self.classify_indicator_count(features),
        };
        tracing::debug!(
            rule_set = ?self.rule_set,
            status = status.as_str(),
            confidence,
            "[Classifier] Classified clip"
        );
        (status, confidence)
    }

    /// Scored rule set
    ///
    /// 1. power_db < -40 -> (NOISE, 0.6)
    /// 2. score = frequency term + tension term + power term
    /// 3. score >= 0.6 -> (CRACK, min(0.95, score))
    /// 4. score >= 0.3 -> (NORMAL, 0.65)
    /// 5. otherwise   -> (NORMAL, 0.8)
    pub fn classify_scored(&self, features: &Features) -> (NoiseStatus, f64) {
        if features.power_db < CLASSIFIER_WEAK_SIGNAL_DB {
            return (NoiseStatus::Noise, WEAK_SIGNAL_CONFIDENCE);
        }

        let crack_score = Self::crack_score(features);

        if crack_score >= SCORED_CRACK_SCORE {
            (NoiseStatus::Crack, crack_score.min(SCORED_MAX_CONFIDENCE))
        } else if crack_score >= SCORED_AMBIGUOUS_SCORE {
            (NoiseStatus::Normal, 0.65)
        } else {
            (NoiseStatus::Normal, 0.8)
        }
    }

    /// Weighted crack score, accumulated frequency, tension, then power
    pub fn crack_score(features: &Features) -> f64 {
        let mut crack_score = 0.0;

        // Cracks are sharp, high-frequency transients
        if features.frequency > SCORED_HIGH_FREQUENCY_HZ {
            crack_score += 0.3;
        } else if features.frequency > SCORED_MID_FREQUENCY_HZ {
            crack_score += 0.15;
        }

        // Noise-like spectrum
        if features.surface_tension > SCORED_HIGH_TENSION {
            crack_score += 0.4;
        } else if features.surface_tension > SCORED_MID_TENSION {
            crack_score += 0.2;
        }

        if features.power_db > SCORED_LOUD_DB {
            crack_score += 0.3;
        } else if features.power_db > SCORED_MODERATE_DB {
            crack_score += 0.15;
        }

        crack_score
    }

    /// Indicator-count rule set
    ///
    /// 1. power_db < -40 -> (NOISE, 0.6)
    /// 2. count = [frequency > 1500] + [tension > 0.6] + [power_db > -20]
    /// 3. count >= 2 -> (CRACK, min(0.9, 0.5 + 0.2 * count))
    /// 4. count == 1 -> (NORMAL, 0.7)
    /// 5. otherwise  -> (NORMAL, 0.8)
    pub fn classify_indicator_count(&self, features: &Features) -> (NoiseStatus, f64) {
        if features.power_db < CLASSIFIER_WEAK_SIGNAL_DB {
            return (NoiseStatus::Noise, WEAK_SIGNAL_CONFIDENCE);
        }

        let count = Self::indicator_count(features);

        if count >= 2 {
            let confidence = (0.5 + 0.2 * count as f64).min(INDICATOR_MAX_CONFIDENCE);
            (NoiseStatus::Crack, confidence)
        } else if count == 1 {
            (NoiseStatus::Normal, 0.7)
        } else {
            (NoiseStatus::Normal, 0.8)
        }
    }

    /// Number of crack indicators present (0-3)
    pub fn indicator_count(features: &Features) -> u32 {
        [
            features.frequency > INDICATOR_FREQUENCY_HZ,
            features.surface_tension > INDICATOR_TENSION,
            features.power_db > INDICATOR_LOUD_DB,
        ]
        .iter()
        .filter(|&&hit| hit)
        .count() as u32
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
