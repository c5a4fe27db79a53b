//! Time-domain rate estimate from sign changes

use ndarray::Array1;

use super::{EstimatorKind, FrequencyEstimator, RawEstimate};
use crate::error::{Result, VitalsError};

const MIN_SAMPLES: usize = 3;

/// Number of sign changes; zero counts as positive
pub fn count_zero_crossings(signal: &Array1<f32>) -> usize {
    signal
        .iter()
        .map(|&v| v >= 0.0)
        .collect::<Vec<_>>()
        .windows(2)
        .filter(|w| w[0] != w[1])
        .count()
}

/// Two crossings per cycle: `f = crossings / (2 * duration)`, in BPM
pub fn bpm_from_crossings(crossings: usize, duration_s: f32) -> f32 {
    if duration_s <= 0.0 {
        return 0.0;
    }
    crossings as f32 / (2.0 * duration_s) * 60.0
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroCrossingEstimator;

impl FrequencyEstimator for ZeroCrossingEstimator {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::ZeroCrossing
    }

    fn estimate(&mut self, filtered: &Array1<f32>, sample_rate: f32) -> Result<RawEstimate> {
        if filtered.len() < MIN_SAMPLES {
            return Err(VitalsError::InsufficientSignal {
                have: filtered.len(),
                need: MIN_SAMPLES,
            });
        }
        let duration_s = filtered.len() as f32 / sample_rate;
        let crossings = count_zero_crossings(filtered);
        let bpm = bpm_from_crossings(crossings, duration_s);

        log::trace!(
            "zero-crossing: {} crossings over {:.2}s -> {:.1} bpm",
            crossings,
            duration_s,
            bpm
        );

        Ok(RawEstimate {
            bpm: self.kind().clamp_bpm(bpm),
            frequency_hz: bpm / 60.0,
        })
    }
}
