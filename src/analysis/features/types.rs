// Types module - Scalars fed into the classifier

/// Features extracted from one clip
///
/// These three scalars are everything the classifier sees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    /// Dominant frequency in Hz (0.0 when no estimate is possible)
    pub frequency: f64,

    /// RMS power in dBFS
    pub power_db: f64,

    /// Spectral-flatness-like "surface tension"
    ///
    /// Near 0.0 = tonal, towards 1.0 = noise-like. Only the spectral
    /// estimator guarantees (0, 1].
    pub surface_tension: f64,
}

impl Features {
    pub fn new(frequency: f64, power_db: f64, surface_tension: f64) -> Self {
        Self {
            frequency,
            power_db,
            surface_tension,
        }
    }
}
