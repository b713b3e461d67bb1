//! Synthetic clip generation for manual checks and test fixtures.
//!
//! Produces deterministic PCM (tones, seeded noise, silence, impulse trains)
//! and writes it as 16-bit PCM WAV, the only encoding the decoder accepts.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;

use crate::error::AnalysisError;

/// Supported deterministic waveform patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntheticPattern {
    Sine,
    WhiteNoise,
    Silence,
    /// Single-sample spikes repeating at `frequency_hz`
    ImpulseTrain,
}

/// Configuration for a synthetic clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticSpec {
    pub pattern: SyntheticPattern,
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: f32,
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_frequency_hz() -> f32 {
    1_000.0
}

fn default_amplitude() -> f32 {
    0.5
}

fn default_seed() -> u64 {
    0x5EED
}

impl SyntheticSpec {
    pub fn new(pattern: SyntheticPattern) -> Self {
        Self {
            pattern,
            frequency_hz: default_frequency_hz(),
            amplitude: default_amplitude(),
            seed: default_seed(),
        }
    }

    pub fn with_frequency(mut self, frequency_hz: f32) -> Self {
        self.frequency_hz = frequency_hz;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Number of frames covering `duration_ms` at `sample_rate`.
pub fn frames_for_duration(duration_ms: u32, sample_rate: u32) -> usize {
    ((duration_ms as f64 / 1_000.0) * sample_rate as f64).round() as usize
}

/// Generate `frames` mono samples for `spec` at `sample_rate`.
pub fn generate(spec: &SyntheticSpec, sample_rate: u32, frames: usize) -> Vec<f32> {
    let amplitude = spec.amplitude;
    match spec.pattern {
        SyntheticPattern::Silence => vec![0.0; frames],
        SyntheticPattern::Sine => {
            let step = 2.0 * PI * spec.frequency_hz as f64 / sample_rate.max(1) as f64;
            (0..frames)
                .map(|i| ((step * i as f64).sin() as f32) * amplitude)
                .collect()
        }
        SyntheticPattern::WhiteNoise => {
            let mut rng = StdRng::seed_from_u64(spec.seed);
            (0..frames)
                .map(|_| rng.gen_range(-1.0f32..1.0) * amplitude)
                .collect()
        }
        SyntheticPattern::ImpulseTrain => {
            let period = if spec.frequency_hz > 0.0 {
                ((sample_rate as f32 / spec.frequency_hz).round() as usize).max(1)
            } else {
                frames.max(1)
            };
            (0..frames)
                .map(|i| if i % period == 0 { amplitude } else { 0.0 })
                .collect()
        }
    }
}

/// Interleave two equally long channels as L, R, L, R, ...
pub fn interleave_stereo(left: &[f32], right: &[f32]) -> Vec<f32> {
    left.iter()
        .zip(right)
        .flat_map(|(&l, &r)| [l, r])
        .collect()
}

/// Quantize a normalized sample to signed 16-bit PCM, clamping out-of-range input.
pub fn quantize_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

/// Write interleaved normalized samples as a 16-bit PCM WAV file.
pub fn write_pcm16<P: AsRef<Path>>(
    path: P,
    sample_rate: u32,
    channels: u16,
    interleaved: &[f32],
) -> Result<(), AnalysisError> {
    let path = path.as_ref();
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer =
        hound::WavWriter::create(path, spec).map_err(|err| AnalysisError::wav_write(path, err))?;
    for &sample in interleaved {
        writer
            .write_sample(quantize_pcm16(sample))
            .map_err(|err| AnalysisError::wav_write(path, err))?;
    }
    writer
        .finalize()
        .map_err(|err| AnalysisError::wav_write(path, err))?;

    tracing::debug!(
        path = %path.display(),
        frames = interleaved.len() / channels.max(1) as usize,
        "[Synth] Wrote clip"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::wav::{decode_wav, PCM16_SCALE};
    use tempfile::TempDir;

    #[test]
    fn test_frames_for_duration() {
        assert_eq!(frames_for_duration(200, 44_100), 8_820);
        assert_eq!(frames_for_duration(0, 48_000), 0);
    }

    #[test]
    fn test_white_noise_is_seeded() {
        let spec = SyntheticSpec::new(SyntheticPattern::WhiteNoise).with_seed(7);
        let a = generate(&spec, 44_100, 512);
        let b = generate(&spec, 44_100, 512);
        let c = generate(&spec.clone().with_seed(8), 44_100, 512);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|s| s.abs() <= 0.5));
    }

    #[test]
    fn test_impulse_train_period() {
        let spec = SyntheticSpec::new(SyntheticPattern::ImpulseTrain)
            .with_frequency(100.0)
            .with_amplitude(0.9);
        let clip = generate(&spec, 8_000, 400);
        let spikes: Vec<usize> = clip
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s > 0.0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(spikes, vec![0, 80, 160, 240, 320]);
    }

    #[test]
    fn test_quantize_clamps() {
        assert_eq!(quantize_pcm16(2.0), i16::MAX);
        assert_eq!(quantize_pcm16(-2.0), -i16::MAX);
        assert_eq!(quantize_pcm16(0.0), 0);
    }

    #[test]
    fn test_interleave_stereo() {
        assert_eq!(
            interleave_stereo(&[1.0, 2.0], &[-1.0, -2.0]),
            vec![1.0, -1.0, 2.0, -2.0]
        );
    }

    #[test]
    fn test_write_then_decode_stereo() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stereo.wav");
        let left = generate(
            &SyntheticSpec::new(SyntheticPattern::Sine).with_frequency(440.0),
            22_050,
            256,
        );
        let right = vec![-0.25; 256];
        write_pcm16(&path, 22_050, 2, &interleave_stereo(&left, &right)).unwrap();

        let audio = decode_wav(&path);
        let expected: Vec<f32> = left
            .iter()
            .map(|&s| quantize_pcm16(s) as f32 / PCM16_SCALE)
            .collect();
        assert_eq!(audio.samples, expected);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("clip.wav");
        let err = write_pcm16(&path, 8_000, 1, &[0.0; 16]).unwrap_err();
        assert!(matches!(err, AnalysisError::WavWrite { .. }));
    }
}
