// Crack Detector Core - offline acoustic analysis of display audio clips
// Decodes one WAV clip and classifies it as CRACK, NORMAL or NOISE

// Module declarations
pub mod analysis;
pub mod audio;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use analysis::{
    analyze, AnalysisResult, Analyzer, EstimatorStrategy, NoiseStatus, WEAK_SIGNAL_GATE_DB,
};
pub use audio::{decode_wav, DecodedAudio};
pub use config::AppConfig;
