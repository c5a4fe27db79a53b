//! FFT peak-picking inside the heart-rate band

use ndarray::Array1;

use super::{EstimatorKind, FrequencyEstimator, RawEstimate};
use crate::dsp::{hamming_window, magnitude_spectrum, SpectralBin};
use crate::error::{Result, VitalsError};

/// Strict local maxima with frequency in `[min_hz, max_hz]`, strongest first
pub fn find_peaks(spectrum: &[SpectralBin], min_hz: f32, max_hz: f32) -> Vec<SpectralBin> {
    let mut peaks: Vec<SpectralBin> = spectrum
        .windows(3)
        .filter_map(|w| {
            let (prev, bin, next) = (w[0], w[1], w[2]);
            let in_band = bin.frequency_hz >= min_hz && bin.frequency_hz <= max_hz;
            (in_band && bin.magnitude > prev.magnitude && bin.magnitude > next.magnitude)
                .then_some(bin)
        })
        .collect();
    peaks.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
    peaks
}

#[derive(Debug, Clone)]
pub struct SpectralEstimator {
    min_hz: f32,
    max_hz: f32,
    last_spectrum: Vec<SpectralBin>,
}

impl SpectralEstimator {
    pub fn new(min_hz: f32, max_hz: f32) -> Self {
        Self {
            min_hz,
            max_hz,
            last_spectrum: Vec::new(),
        }
    }

    /// Magnitude spectrum of the most recent cycle
    pub fn last_spectrum(&self) -> &[SpectralBin] {
        &self.last_spectrum
    }
}

impl FrequencyEstimator for SpectralEstimator {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Spectral
    }

    fn estimate(&mut self, filtered: &Array1<f32>, sample_rate: f32) -> Result<RawEstimate> {
        let windowed = filtered * &hamming_window(filtered.len());
        self.last_spectrum = magnitude_spectrum(&windowed, sample_rate);

        let peak = find_peaks(&self.last_spectrum, self.min_hz, self.max_hz)
            .into_iter()
            .next()
            .ok_or(VitalsError::InsufficientSignal {
                have: filtered.len(),
                need: filtered.len().next_power_of_two(),
            })?;

        log::trace!(
            "spectral: peak {:.3} Hz (mag {:.2}) over {} bins",
            peak.frequency_hz,
            peak.magnitude,
            self.last_spectrum.len()
        );

        Ok(RawEstimate {
            bpm: self.kind().clamp_bpm(peak.frequency_hz * 60.0),
            frequency_hz: peak.frequency_hz,
        })
    }
}
