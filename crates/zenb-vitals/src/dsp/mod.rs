//! DSP (Digital Signal Processing) module
//!
//! Buffering, preprocessing and spectral utilities shared by the heart-rate
//! estimators and the quality scorer.
//!
//! - `SignalBuffer` - bounded, time-ordered ROI samples
//! - `Preprocessor` - detrend, z-score and IIR band-limit
//! - `magnitude_spectrum` - radix-2 FFT magnitude bins
//! - `BpmSmoother` - rolling median over recent estimates
//! - `QualityScorer` - mean/std score plus spectral SNR

mod buffer;
mod fft;
mod preprocess;
mod quality;
mod signal_quality;
mod smoothing;

pub use buffer::{BufferMode, Channel, FrameSample, SignalBuffer};
pub use fft::{fft_in_place, magnitude_spectrum, SpectralBin};
pub use preprocess::{
    band_limit, detrend, hamming_window, is_flat, normalize, PreprocessConfig, Preprocessor,
};
pub use quality::{snr_score, QualityReport, QualityScorer};
pub use signal_quality::{SignalQualityAnalyzer, SignalQualityConfig};
pub use smoothing::{BpmSmoother, BPM_MEDIAN_WINDOW};
