//! End-to-end tests for `analyze(path)`
//!
//! Every input (valid clip, missing file, garbage, unsupported encoding) must
//! come back as a complete five-field record.

use std::fs;
use std::path::{Path, PathBuf};

use crack_detector::audio::synth::{
    generate, interleave_stereo, write_pcm16, SyntheticPattern, SyntheticSpec,
};
use crack_detector::{analyze, decode_wav, AnalysisResult, Analyzer, EstimatorStrategy, NoiseStatus};
use tempfile::TempDir;

const SAMPLE_RATE: u32 = 44_100;
const FRAMES: usize = 8_820; // 0.2 s

fn write_clip(dir: &Path, name: &str, spec: &SyntheticSpec) -> PathBuf {
    let path = dir.join(name);
    write_pcm16(&path, SAMPLE_RATE, 1, &generate(spec, SAMPLE_RATE, FRAMES)).unwrap();
    path
}

fn assert_complete(result: &AnalysisResult) {
    let json = serde_json::to_value(result).unwrap();
    for field in ["frequency", "power", "surface_tension", "noise_status", "confidence"] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
    assert!(result.frequency >= 0.0);
    assert!((0.0..=1.0).contains(&result.confidence));
    assert!(["CRACK", "NORMAL", "NOISE"].contains(&result.noise_status.as_str()));
}

#[test]
fn test_totality_over_bad_inputs() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("missing.wav");
    let text = dir.path().join("text.wav");
    fs::write(&text, "RIFF? no.").unwrap();
    let empty = dir.path().join("empty.wav");
    fs::write(&empty, b"").unwrap();
    let directory = dir.path().to_path_buf();

    for path in [&missing, &text, &empty, &directory] {
        for strategy in [EstimatorStrategy::Spectral, EstimatorStrategy::Temporal] {
            let result = Analyzer::new(strategy).analyze(path);
            assert_complete(&result);
            assert_eq!(result, AnalysisResult::FALLBACK, "path {}", path.display());
        }
    }
}

#[test]
fn test_unsupported_widths_yield_empty_signal_record() {
    let dir = TempDir::new().unwrap();

    let u8_path = dir.path().join("u8.wav");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 8,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&u8_path, spec).unwrap();
    for i in 0..FRAMES {
        writer.write_sample(((i % 64) as i8) - 32).unwrap();
    }
    writer.finalize().unwrap();

    let f32_path = dir.path().join("f32.wav");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(&f32_path, spec).unwrap();
    for sample in generate(&SyntheticSpec::new(SyntheticPattern::Sine), SAMPLE_RATE, FRAMES) {
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();

    for path in [&u8_path, &f32_path] {
        let audio = decode_wav(path);
        assert!(audio.is_empty());
        assert_eq!(audio.sample_rate, 0);
        assert_eq!(analyze(path), AnalysisResult::FALLBACK);
    }
}

/// Mono 16-bit RIFF bytes with an arbitrary header sample rate
fn raw_pcm16_file(sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVEfmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

#[test]
fn test_zero_sample_rate_header_yields_fallback() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zero_rate.wav");
    let samples: Vec<i16> = (0..2_000)
        .map(|i| if i % 2 == 0 { 16_000 } else { -16_000 })
        .collect();
    fs::write(&path, raw_pcm16_file(0, &samples)).unwrap();

    for strategy in [EstimatorStrategy::Spectral, EstimatorStrategy::Temporal] {
        assert_eq!(Analyzer::new(strategy).analyze(&path), AnalysisResult::FALLBACK);
    }
}

#[test]
fn test_data_chunk_cut_mid_sample_yields_fallback() {
    let dir = TempDir::new().unwrap();
    let samples: Vec<i16> = (0..FRAMES)
        .map(|i| if i % 2 == 0 { 16_000 } else { -16_000 })
        .collect();
    let mut bytes = raw_pcm16_file(SAMPLE_RATE, &samples);

    // Cut on a sample boundary: the prefix is still classified
    let even = dir.path().join("even_cut.wav");
    bytes.truncate(bytes.len() - 2_000);
    fs::write(&even, &bytes).unwrap();
    assert_eq!(decode_wav(&even).len(), FRAMES - 1_000);
    assert_ne!(analyze(&even), AnalysisResult::FALLBACK);

    // One more byte off leaves half a sample at the end
    let odd = dir.path().join("odd_cut.wav");
    bytes.truncate(bytes.len() - 1);
    fs::write(&odd, &bytes).unwrap();
    assert!(decode_wav(&odd).is_empty());
    assert_eq!(analyze(&odd), AnalysisResult::FALLBACK);
}

#[test]
fn test_spectral_frequency_recovery_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_clip(
        dir.path(),
        "tone.wav",
        &SyntheticSpec::new(SyntheticPattern::Sine).with_frequency(1_000.0),
    );

    let result = analyze(&path);
    assert_complete(&result);
    let bin_width = SAMPLE_RATE as f64 / FRAMES as f64;
    assert!((result.frequency - 1_000.0).abs() <= bin_width);
    assert_eq!(result.noise_status, NoiseStatus::Normal);
}

#[test]
fn test_temporal_frequency_recovery_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_clip(
        dir.path(),
        "tone.wav",
        &SyntheticSpec::new(SyntheticPattern::Sine).with_frequency(1_000.0),
    );

    let result = Analyzer::new(EstimatorStrategy::Temporal).analyze(&path);
    assert_complete(&result);
    // Lag resolution at 44.1 kHz around 44 samples is ~23 Hz
    assert!((result.frequency - 1_000.0).abs() < 25.0, "got {}", result.frequency);
}

#[test]
fn test_weak_clip_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_clip(
        dir.path(),
        "faint.wav",
        &SyntheticSpec::new(SyntheticPattern::WhiteNoise).with_amplitude(0.002),
    );

    let result = analyze(&path);
    assert!(result.power < -50.0);
    assert_eq!(result.frequency, 0.0);
    assert_eq!(result.surface_tension, 0.0);
    assert_eq!(result.noise_status, NoiseStatus::Noise);
    assert_eq!(result.confidence, 0.5);
}

#[test]
fn test_silent_clip_power_floor() {
    let dir = TempDir::new().unwrap();
    let path = write_clip(dir.path(), "silence.wav", &SyntheticSpec::new(SyntheticPattern::Silence));

    let result = analyze(&path);
    assert_eq!(result.power, -100.0);
    assert_eq!(result.noise_status, NoiseStatus::Noise);
    assert_eq!(result.confidence, 0.5);
}

#[test]
fn test_noise_flatter_than_tone_from_files() {
    let dir = TempDir::new().unwrap();
    let tone = write_clip(
        dir.path(),
        "tone.wav",
        &SyntheticSpec::new(SyntheticPattern::Sine).with_amplitude(0.3),
    );
    // Uniform noise with amplitude 0.3 * sqrt(1.5) has the tone's RMS
    let noise = write_clip(
        dir.path(),
        "noise.wav",
        &SyntheticSpec::new(SyntheticPattern::WhiteNoise)
            .with_amplitude(0.3 * 1.5f32.sqrt())
            .with_seed(99),
    );

    let tone_result = analyze(&tone);
    let noise_result = analyze(&noise);
    assert!((tone_result.power - noise_result.power).abs() < 1.0);
    assert!(noise_result.surface_tension > tone_result.surface_tension);
    assert!(noise_result.surface_tension <= 1.0);
}

#[test]
fn test_stereo_clip_uses_left_channel() {
    let dir = TempDir::new().unwrap();
    let left = generate(
        &SyntheticSpec::new(SyntheticPattern::Sine).with_frequency(500.0),
        SAMPLE_RATE,
        FRAMES,
    );
    let right = generate(
        &SyntheticSpec::new(SyntheticPattern::Sine).with_frequency(3_000.0),
        SAMPLE_RATE,
        FRAMES,
    );
    let path = dir.path().join("stereo.wav");
    write_pcm16(&path, SAMPLE_RATE, 2, &interleave_stereo(&left, &right)).unwrap();

    let result = analyze(&path);
    assert!((result.frequency - 500.0).abs() <= 5.0, "got {}", result.frequency);
}

#[test]
fn test_loud_broadband_burst_is_not_noise() {
    let dir = TempDir::new().unwrap();
    let path = write_clip(
        dir.path(),
        "burst.wav",
        &SyntheticSpec::new(SyntheticPattern::WhiteNoise)
            .with_amplitude(0.9)
            .with_seed(3),
    );

    let result = analyze(&path);
    assert_complete(&result);
    assert!(result.power > -15.0);
    assert_ne!(result.noise_status, NoiseStatus::Noise);
}
