//! Green-channel preprocessing
//!
//! detrend -> z-score -> two-stage IIR band-limit. The IIR cascade is a
//! coarse approximation of a 0.75-3 Hz bandpass (leaky-integrator high-pass
//! followed by exponential-smoothing low-pass), not a Butterworth design.

use ndarray::Array1;
use std::f32::consts::PI;

use crate::error::{Result, VitalsError};

#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Leaky-integrator coefficient of the high-pass baseline tracker
    pub highpass_alpha: f32,
    /// Exponential-smoothing coefficient of the low-pass stage
    pub lowpass_alpha: f32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            highpass_alpha: 0.1,
            lowpass_alpha: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    config: PreprocessConfig,
}

impl Preprocessor {
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    /// Run the full chain on a raw channel series
    ///
    /// Fails with `DegenerateSignal` on flat input; the caller skips the cycle.
    pub fn run(&self, raw: &Array1<f32>) -> Result<Array1<f32>> {
        if is_flat(raw) {
            return Err(VitalsError::DegenerateSignal);
        }
        let detrended = detrend(raw);
        let normalized = normalize(&detrended)?;
        Ok(band_limit(
            &normalized,
            self.config.highpass_alpha,
            self.config.lowpass_alpha,
        ))
    }
}

/// True when every value is identical (or there are no values)
pub fn is_flat(signal: &Array1<f32>) -> bool {
    match signal.iter().next() {
        Some(&first) => signal.iter().all(|&v| v == first),
        None => true,
    }
}

/// Subtract the least-squares line fitted over sample index
pub fn detrend(signal: &Array1<f32>) -> Array1<f32> {
    let n = signal.len();
    if n == 0 {
        return Array1::zeros(0);
    }

    let mean_x = (n as f64 - 1.0) / 2.0;
    let mean_y = signal.iter().map(|&v| v as f64).sum::<f64>() / n as f64;

    let mut sxy = 0.0f64;
    let mut sxx = 0.0f64;
    for (i, &y) in signal.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxy += dx * (y as f64 - mean_y);
        sxx += dx * dx;
    }
    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let intercept = mean_y - slope * mean_x;

    signal
        .iter()
        .enumerate()
        .map(|(i, &y)| (y as f64 - (intercept + slope * i as f64)) as f32)
        .collect()
}

/// Z-score; zero standard deviation aborts instead of dividing by zero
pub fn normalize(signal: &Array1<f32>) -> Result<Array1<f32>> {
    let n = signal.len();
    if n == 0 {
        return Err(VitalsError::InsufficientSignal { have: 0, need: 1 });
    }
    let mean = signal.sum() / n as f32;
    let var = signal.iter().map(|&v| (v - mean).powi(2)).sum::<f32>() / n as f32;
    let std = var.sqrt();

    if std == 0.0 || !std.is_finite() {
        return Err(VitalsError::DegenerateSignal);
    }
    Ok(signal.mapv(|v| (v - mean) / std))
}

/// Two-stage IIR cascade
///
/// High-pass: `baseline += a_hp * (x - baseline)`, `y = x - baseline`.
/// Low-pass:  `z += a_lp * (y - z)`.
pub fn band_limit(signal: &Array1<f32>, highpass_alpha: f32, lowpass_alpha: f32) -> Array1<f32> {
    let mut out = Array1::zeros(signal.len());
    let Some(&first) = signal.iter().next() else {
        return out;
    };

    let mut baseline = first;
    let mut smoothed = 0.0f32;
    for (i, &x) in signal.iter().enumerate() {
        baseline += highpass_alpha * (x - baseline);
        let high = x - baseline;
        smoothed += lowpass_alpha * (high - smoothed);
        out[i] = smoothed;
    }
    out
}

/// Hamming window coefficients
pub fn hamming_window(size: usize) -> Array1<f32> {
    if size < 2 {
        return Array1::ones(size);
    }
    (0..size)
        .map(|i| 0.54 - 0.46 * ((2.0 * PI * i as f32) / ((size - 1) as f32)).cos())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sine(freq_hz: f32, fs: f32, n: usize) -> Array1<f32> {
        (0..n)
            .map(|i| (2.0 * PI * freq_hz * i as f32 / fs).sin())
            .collect()
    }

    #[test]
    fn test_detrend_removes_line() {
        let line: Array1<f32> = (0..50).map(|i| 3.0 + 0.5 * i as f32).collect();
        let out = detrend(&line);
        for v in out.iter() {
            assert_relative_eq!(*v, 0.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_detrend_keeps_oscillation() {
        let base = sine(1.0, 30.0, 90);
        let ramped: Array1<f32> = base
            .iter()
            .enumerate()
            .map(|(i, v)| v + 100.0 + 0.2 * i as f32)
            .collect();
        let out = detrend(&ramped);
        let err: f32 = out
            .iter()
            .zip(base.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max);
        assert!(err < 0.1, "max deviation {}", err);
    }

    #[test]
    fn test_normalize() {
        let arr = Array1::from(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let normalized = normalize(&arr).unwrap();

        assert_relative_eq!(normalized.mean().unwrap(), 0.0, epsilon = 1e-6);
        let var = normalized.iter().map(|v| v * v).sum::<f32>() / 5.0;
        assert_relative_eq!(var.sqrt(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_normalize_rejects_zero_variance() {
        let flat = Array1::from(vec![0.0f32; 20]);
        assert!(matches!(normalize(&flat), Err(VitalsError::DegenerateSignal)));
    }

    #[test]
    fn test_flat_signal_is_degenerate() {
        let pre = Preprocessor::default();
        for len in [1usize, 2, 17, 300] {
            let flat = Array1::from(vec![128.3f32; len]);
            assert!(matches!(pre.run(&flat), Err(VitalsError::DegenerateSignal)));
        }
    }

    #[test]
    fn test_band_limit_recurrence() {
        let x = Array1::from(vec![0.0, 1.0, 1.0]);
        let y = band_limit(&x, 0.5, 0.5);
        // baseline: 0, 0.5, 0.75 ; high: 0, 0.5, 0.25 ; low: 0, 0.25, 0.25
        assert_relative_eq!(y[0], 0.0);
        assert_relative_eq!(y[1], 0.25);
        assert_relative_eq!(y[2], 0.25);
    }

    #[test]
    fn test_band_limit_blocks_dc() {
        let dc = Array1::from(vec![5.0f32; 200]);
        let y = band_limit(&dc, 0.1, 0.1);
        assert!(y.iter().all(|v| v.abs() < 1e-6));
    }

    #[test]
    fn test_hamming_window_shape() {
        let w = hamming_window(5);
        assert_relative_eq!(w[0], 0.08, epsilon = 1e-6);
        assert_relative_eq!(w[2], 1.0, epsilon = 1e-6);
        assert_relative_eq!(w[4], 0.08, epsilon = 1e-6);
    }

    #[test]
    fn test_run_output_length() {
        let pre = Preprocessor::default();
        let raw: Array1<f32> = sine(1.2, 30.0, 180).mapv(|v| 120.0 + 2.0 * v);
        let out = pre.run(&raw).unwrap();
        assert_eq!(out.len(), 180);
        assert!(out.iter().all(|v| v.is_finite()));
    }
}
