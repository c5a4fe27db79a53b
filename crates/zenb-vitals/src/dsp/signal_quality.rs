//! Spectral SNR of the preprocessed pulse signal
//!
//! Diagnostic companion to the mean/std quality score: peak power versus the
//! remaining power inside the heart-rate band, in dB.

use ndarray::Array1;
use num_complex::Complex32;
use rustfft::FftPlanner;

use super::preprocess::hamming_window;

/// Reported when the band holds a single non-zero bin
const MAX_SNR_DB: f32 = 60.0;

/// Configuration for spectral SNR assessment
#[derive(Debug, Clone)]
pub struct SignalQualityConfig {
    /// Sample rate in Hz
    pub sample_rate: f32,
    /// Minimum HR frequency (Hz)
    pub min_freq: f32,
    /// Maximum HR frequency (Hz)
    pub max_freq: f32,
}

impl Default for SignalQualityConfig {
    fn default() -> Self {
        Self {
            sample_rate: 30.0,
            min_freq: 0.75,
            max_freq: 3.0,
        }
    }
}

pub struct SignalQualityAnalyzer {
    config: SignalQualityConfig,
    fft_planner: FftPlanner<f32>,
}

impl SignalQualityAnalyzer {
    pub fn new(config: SignalQualityConfig) -> Self {
        Self {
            config,
            fft_planner: FftPlanner::new(),
        }
    }

    /// SNR in dB, or `None` when the band holds fewer than two bins or no power
    pub fn snr_db(&mut self, signal: &Array1<f32>) -> Option<f32> {
        let n = signal.len();
        if n < 4 {
            return None;
        }
        let fs = self.config.sample_rate;

        let window = hamming_window(n);
        let mut buffer: Vec<Complex32> = signal
            .iter()
            .zip(window.iter())
            .map(|(s, w)| Complex32::new(s * w, 0.0))
            .collect();

        let fft = self.fft_planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        let half_n = n / 2;
        let bin_res = fs / n as f32;
        let min_bin = (self.config.min_freq / bin_res).ceil() as usize;
        let max_bin = ((self.config.max_freq / bin_res) as usize).min(half_n - 1);
        if min_bin >= max_bin {
            return None;
        }

        let mut peak_power = 0.0f32;
        let mut total_power = 0.0f32;
        for c in &buffer[min_bin..=max_bin] {
            let power = c.norm_sqr();
            total_power += power;
            peak_power = peak_power.max(power);
        }

        let noise_power = total_power - peak_power;
        if peak_power <= 0.0 {
            return None;
        }
        if noise_power <= 0.0 {
            return Some(MAX_SNR_DB);
        }
        Some(10.0 * (peak_power / noise_power).log10())
    }
}
