// WAV decoder - 16-bit PCM container parsing
//
// Turns a RIFF/WAVE file into normalized mono samples. Every failure
// (missing file, corrupt header, unsupported encoding) collapses into the
// empty-sequence sentinel so that callers never see an error from here.

use std::path::Path;

use crate::error::{log_analysis_error, AnalysisError, ErrorCode};

/// Divisor mapping signed 16-bit PCM onto [-1.0, 1.0)
pub const PCM16_SCALE: f32 = 32768.0;

/// Decoded mono sample sequence plus its sample rate
///
/// An empty sequence with `sample_rate == 0` is the decoder's failure sentinel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl DecodedAudio {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// The failure sentinel: no samples, sample rate 0
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Clip duration in seconds (0.0 when the sample rate is unknown)
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decode a WAV file into normalized mono samples
///
/// Only 16-bit integer PCM is accepted. Stereo input keeps the left channel
/// (every other sample starting at index 0); other channel counts are
/// returned interleaved as stored. The file handle is dropped before return
/// on every path.
///
/// # Returns
/// Decoded audio, or [`DecodedAudio::empty`] on any failure
pub fn decode_wav<P: AsRef<Path>>(path: P) -> DecodedAudio {
    let path = path.as_ref();
    match read_pcm16(path) {
        Ok(audio) => {
            tracing::debug!(
                path = %path.display(),
                samples = audio.len(),
                sample_rate = audio.sample_rate,
                duration_secs = audio.duration_secs(),
                "[WavDecoder] Decoded clip"
            );
            audio
        }
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                code = err.code(),
                "[WavDecoder] Rejected input: {}",
                err.message()
            );
            DecodedAudio::empty()
        }
    }
}

fn read_pcm16(path: &Path) -> Result<DecodedAudio, AnalysisError> {
    let mut reader =
        hound::WavReader::open(path).map_err(|err| AnalysisError::wav_open(path, err))?;
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(AnalysisError::UnsupportedFormat {
            bits_per_sample: spec.bits_per_sample,
            float: spec.sample_format == hound::SampleFormat::Float,
        });
    }
    if spec.sample_rate == 0 {
        return Err(AnalysisError::InvalidSampleRate {
            sample_rate: spec.sample_rate,
        });
    }

    let mut interleaved: Vec<i16> = Vec::with_capacity(reader.len() as usize);
    for sample in reader.samples::<i16>() {
        match sample {
            Ok(value) => interleaved.push(value),
            Err(err) => {
                let err = AnalysisError::SampleRead {
                    reason: err.to_string(),
                };
                // RIFF chunks are word-aligned, so an odd file length means
                // the data chunk ends inside a sample
                if ends_mid_sample(path) {
                    return Err(err);
                }
                // Truncated on a sample boundary: keep what was read so far
                log_analysis_error(&err, "read_pcm16 (short read)");
                break;
            }
        }
    }

    let step = if spec.channels == 2 { 2 } else { 1 };
    let samples = interleaved
        .iter()
        .step_by(step)
        .map(|&value| value as f32 / PCM16_SCALE)
        .collect();

    Ok(DecodedAudio::new(samples, spec.sample_rate))
}

fn ends_mid_sample(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.len() % 2 == 1)
        .unwrap_or(true)
}
