//! Remote Photoplethysmography (rPPG) heart-rate estimation
//!
//! Two interchangeable strategies operate on the preprocessed green-channel
//! pulse signal:
//!
//! - `ZeroCrossingEstimator` - time-domain sign-change counting
//! - `SpectralEstimator` - FFT peak-picking inside the HR band
//!
//! Both clamp their output to the strategy's physiological bounds.

mod spectral;
mod zero_crossing;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::config::VitalsConfig;
use crate::error::Result;

pub use spectral::{find_peaks, SpectralEstimator};
pub use zero_crossing::{bpm_from_crossings, count_zero_crossings, ZeroCrossingEstimator};

/// Heart-rate estimation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorKind {
    ZeroCrossing,
    Spectral,
}

impl EstimatorKind {
    /// Inclusive BPM clamp applied by the strategy
    pub fn bpm_bounds(self) -> (u16, u16) {
        match self {
            Self::ZeroCrossing => (40, 180),
            Self::Spectral => (45, 180),
        }
    }

    pub fn clamp_bpm(self, bpm: f32) -> u16 {
        let (lo, hi) = self.bpm_bounds();
        bpm.round().clamp(lo as f32, hi as f32) as u16
    }
}

/// One unsmoothed estimate from a single evaluation cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawEstimate {
    /// Clamped to the strategy bounds
    pub bpm: u16,
    /// Dominant frequency before clamping (Hz)
    pub frequency_hz: f32,
}

/// Common interface of the heart-rate strategies
pub trait FrequencyEstimator: Send {
    fn kind(&self) -> EstimatorKind;

    /// Estimate from a preprocessed pulse signal sampled at `sample_rate` Hz
    ///
    /// Samples are taken as contiguous, so time spans are `len / sample_rate`.
    /// The session drops the window when a face is reacquired after a gap.
    ///
    /// Fails with `InsufficientSignal` when no rate can be derived; callers
    /// skip the cycle.
    fn estimate(&mut self, filtered: &Array1<f32>, sample_rate: f32) -> Result<RawEstimate>;
}

/// Build the strategy selected by `config.estimator`
pub fn build_estimator(config: &VitalsConfig) -> Box<dyn FrequencyEstimator> {
    match config.estimator {
        EstimatorKind::ZeroCrossing => Box::new(ZeroCrossingEstimator),
        EstimatorKind::Spectral => Box::new(SpectralEstimator::new(config.min_hz, config.max_hz)),
    }
}
