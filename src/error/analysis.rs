// Analysis error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;
use std::path::Path;

/// Analysis error code constants
///
/// Error code range: 3001-3007
pub struct AnalysisErrorCodes {}

impl AnalysisErrorCodes {
    /// WAV container could not be opened or its header could not be parsed
    pub const WAV_OPEN: i32 = 3001;

    /// Encoding is not 16-bit integer PCM
    pub const UNSUPPORTED_FORMAT: i32 = 3002;

    /// Sample data could not be read from the data chunk
    pub const SAMPLE_READ: i32 = 3003;

    /// An estimator produced NaN or infinity
    pub const NON_FINITE_FEATURE: i32 = 3004;

    /// A panic was caught at the pipeline boundary
    pub const PANICKED: i32 = 3005;

    /// A synthetic clip could not be written
    pub const WAV_WRITE: i32 = 3006;

    /// Header declares a sample rate of 0 Hz
    pub const INVALID_SAMPLE_RATE: i32 = 3007;
}

/// Log an analysis error with structured context
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_analysis_error(err: &AnalysisError, context: &str) {
    error!(
        "Analysis error in {}: code={}, component=Analyzer, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised inside the analysis pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// File missing, unreadable, or not a RIFF/WAVE container
    WavOpen { path: String, reason: String },

    /// Sample width other than 16 bits, or a non-integer encoding
    UnsupportedFormat { bits_per_sample: u16, float: bool },

    /// Error while pulling samples out of the data chunk
    SampleRead { reason: String },

    /// Estimator output was NaN or infinite
    NonFiniteFeature { feature: &'static str, value: f64 },

    /// Panic caught by the pipeline safety net
    Panicked { reason: String },

    /// Failed to write a WAV file
    WavWrite { path: String, reason: String },

    /// Non-empty clip without a positive sample rate
    InvalidSampleRate { sample_rate: u32 },
}

impl AnalysisError {
    pub(crate) fn wav_open(path: &Path, err: impl fmt::Display) -> Self {
        AnalysisError::WavOpen {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn wav_write(path: &Path, err: impl fmt::Display) -> Self {
        AnalysisError::WavWrite {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

impl ErrorCode for AnalysisError {
    fn code(&self) -> i32 {
        match self {
            AnalysisError::WavOpen { .. } => AnalysisErrorCodes::WAV_OPEN,
            AnalysisError::UnsupportedFormat { .. } => AnalysisErrorCodes::UNSUPPORTED_FORMAT,
            AnalysisError::SampleRead { .. } => AnalysisErrorCodes::SAMPLE_READ,
            AnalysisError::NonFiniteFeature { .. } => AnalysisErrorCodes::NON_FINITE_FEATURE,
            AnalysisError::Panicked { .. } => AnalysisErrorCodes::PANICKED,
            AnalysisError::WavWrite { .. } => AnalysisErrorCodes::WAV_WRITE,
            AnalysisError::InvalidSampleRate { .. } => AnalysisErrorCodes::INVALID_SAMPLE_RATE,
        }
    }

    fn message(&self) -> String {
        match self {
            AnalysisError::WavOpen { path, reason } => {
                format!("Failed to open WAV {}: {}", path, reason)
            }
            AnalysisError::UnsupportedFormat {
                bits_per_sample,
                float,
            } => {
                let encoding = if *float { "float" } else { "integer" };
                format!(
                    "Unsupported encoding: {}-bit {} (only 16-bit integer PCM is accepted)",
                    bits_per_sample, encoding
                )
            }
            AnalysisError::SampleRead { reason } => format!("Failed to read samples: {}", reason),
            AnalysisError::NonFiniteFeature { feature, value } => {
                format!("Non-finite {} estimate: {}", feature, value)
            }
            AnalysisError::Panicked { reason } => format!("Analysis panicked: {}", reason),
            AnalysisError::WavWrite { path, reason } => {
                format!("Failed to write WAV {}: {}", path, reason)
            }
            AnalysisError::InvalidSampleRate { sample_rate } => {
                format!("Invalid sample rate: {} Hz", sample_rate)
            }
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AnalysisError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for AnalysisError {}
