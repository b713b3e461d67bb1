// FFT module - Fast Fourier Transform computation
//
// This module handles FFT computation with Hann windowing to reduce
// spectral leakage. The whole clip is transformed in one frame; the
// resulting magnitude spectrum feeds the spectral estimators.

use rustfft::{num_complex::Complex, FftPlanner};

/// FFT processor that computes magnitude spectra of whole clips
pub struct FftProcessor {
    planner: FftPlanner<f64>,
}

impl FftProcessor {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// Compute magnitude spectrum using FFT
    ///
    /// Applies a Hann window sized to the input, performs FFT, and returns
    /// the magnitudes of the non-negative frequency bins.
    ///
    /// # Returns
    /// Magnitude spectrum (size = audio.len() / 2 + 1, empty for empty input)
    pub fn compute_magnitude_spectrum(&mut self, audio: &[f32]) -> Vec<f64> {
        if audio.is_empty() {
            return Vec::new();
        }

        let window = hann_window(audio.len());
        let mut buffer: Vec<Complex<f64>> = audio
            .iter()
            .zip(&window)
            .map(|(&sample, &w)| Complex::new(sample as f64 * w, 0.0))
            .collect();

        let fft = self.planner.plan_fft_forward(buffer.len());
        fft.process(&mut buffer);

        buffer[..audio.len() / 2 + 1]
            .iter()
            .map(|c| c.norm())
            .collect()
    }
}

impl Default for FftProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Symmetric Hann (raised-cosine) window of `len` points
pub fn hann_window(len: usize) -> Vec<f64> {
    if len == 1 {
        return vec![1.0];
    }
    let denom = (len - 1) as f64;
    (0..len)
        .map(|i| 0.5 - 0.5 * ((2.0 * std::f64::consts::PI * i as f64) / denom).cos())
        .collect()
}

/// Center frequency of `bin` for a real FFT of `fft_len` points
pub fn bin_frequency(bin: usize, fft_len: usize, sample_rate: u32) -> f64 {
    if fft_len == 0 {
        return 0.0;
    }
    bin as f64 * sample_rate as f64 / fft_len as f64
}
