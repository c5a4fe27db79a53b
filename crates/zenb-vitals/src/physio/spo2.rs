//! Blood-oxygen saturation from the red/green ratio-of-ratios
//!
//! `R = (AC_r / DC_r) / (AC_g / DC_g)` with AC the population standard
//! deviation and DC the mean of each channel, then the empirical calibration
//! `110 - 25R - 3.5R^2`. Tachycardia and weak signals pull the value down.

use ndarray::Array1;

use crate::dsp::{Channel, SignalBuffer};
use crate::error::{Result, VitalsError};

pub const SPO2_MIN: f32 = 88.0;
pub const SPO2_MAX: f32 = 100.0;

fn mean_std(series: &Array1<f32>) -> (f32, f32) {
    let n = series.len() as f32;
    let mean = series.sum() / n;
    let var = series.iter().map(|&v| (v - mean).powi(2)).sum::<f32>() / n;
    (mean, var.sqrt())
}

/// Ratio-of-ratios estimate, clamped to [88, 100] and rounded to 0.1
///
/// Zero DC on either channel or zero green AC yields `DegenerateSignal`.
pub fn spo2_from_channels(
    red: &Array1<f32>,
    green: &Array1<f32>,
    bpm: f32,
    quality: u8,
) -> Result<f32> {
    if red.is_empty() || red.len() != green.len() {
        return Err(VitalsError::InsufficientSignal {
            have: red.len().min(green.len()),
            need: red.len().max(green.len()).max(1),
        });
    }

    let (dc_r, ac_r) = mean_std(red);
    let (dc_g, ac_g) = mean_std(green);
    if dc_r == 0.0 || dc_g == 0.0 || ac_g == 0.0 {
        return Err(VitalsError::DegenerateSignal);
    }

    let ratio = (ac_r / dc_r) / (ac_g / dc_g);
    if !ratio.is_finite() {
        return Err(VitalsError::DegenerateSignal);
    }

    let mut spo2 = 110.0 - 25.0 * ratio - 3.5 * ratio * ratio;
    if bpm > 100.0 {
        spo2 -= 0.02 * (bpm - 100.0);
    }
    if quality < 50 {
        spo2 -= 0.05 * (50 - quality) as f32;
    }

    Ok((spo2.clamp(SPO2_MIN, SPO2_MAX) * 10.0).round() / 10.0)
}

/// Applies `spo2_from_channels` to the tail of a signal buffer
#[derive(Debug, Clone, Copy)]
pub struct Spo2Estimator {
    window: usize,
}

impl Spo2Estimator {
    /// Create an estimator over the last `window` samples (at least 2)
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(2),
        }
    }

    /// Samples required per estimate
    pub fn window(&self) -> usize {
        self.window
    }

    /// SpO2 from the buffer tail; `InsufficientSignal` until the window is filled
    pub fn estimate(&self, buffer: &SignalBuffer, bpm: f32, quality: u8) -> Result<f32> {
        if buffer.len() < self.window {
            return Err(VitalsError::InsufficientSignal {
                have: buffer.len(),
                need: self.window,
            });
        }
        spo2_from_channels(
            &buffer.channel_tail(Channel::Red, self.window),
            &buffer.channel_tail(Channel::Green, self.window),
            bpm,
            quality,
        )
    }
}
