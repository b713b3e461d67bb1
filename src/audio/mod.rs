// Audio module - WAV decoding and synthetic clip generation

pub mod synth;
pub mod wav;

// Re-export commonly used types for convenience
pub use synth::{generate, write_pcm16, SyntheticPattern, SyntheticSpec};
pub use wav::{decode_wav, DecodedAudio, PCM16_SCALE};
