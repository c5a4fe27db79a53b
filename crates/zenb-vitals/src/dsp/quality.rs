//! Signal and face quality scoring
//!
//! Scores are advisory: they gate progress and are reported to the caller,
//! never folded into the numeric vitals.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::buffer::{Channel, SignalBuffer};
use super::signal_quality::{SignalQualityAnalyzer, SignalQualityConfig};
use crate::vision::FaceQuality;

/// Snapshot surfaced on `QualityUpdate` events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// mean/std score, 0-100
    pub signal_quality: u8,
    pub face_quality: FaceQuality,
    /// Spectral SNR of the last preprocessed window (dB)
    pub snr_db: Option<f32>,
}

/// `mean / std * 10`, clamped to 0-100. Zero variance or < 2 samples scores 0.
pub fn snr_score(series: &Array1<f32>) -> u8 {
    let n = series.len();
    if n < 2 {
        return 0;
    }
    let mean = series.sum() / n as f32;
    let var = series.iter().map(|&v| (v - mean).powi(2)).sum::<f32>() / n as f32;
    let std = var.sqrt();
    if std == 0.0 || !std.is_finite() {
        return 0;
    }
    ((mean / std) * 10.0).clamp(0.0, 100.0).round() as u8
}

pub struct QualityScorer {
    window: usize,
    spectral: SignalQualityAnalyzer,
}

impl QualityScorer {
    /// Create a scorer over the last `window` samples
    pub fn new(window: usize, spectral: SignalQualityConfig) -> Self {
        Self {
            window,
            spectral: SignalQualityAnalyzer::new(spectral),
        }
    }

    /// Score over the last `window` green samples
    pub fn signal_quality(&self, buffer: &SignalBuffer) -> u8 {
        snr_score(&buffer.channel_tail(Channel::Green, self.window))
    }

    /// Quality snapshot for one estimation cycle
    pub fn report(
        &mut self,
        buffer: &SignalBuffer,
        face_quality: FaceQuality,
        filtered: Option<&Array1<f32>>,
    ) -> QualityReport {
        QualityReport {
            signal_quality: self.signal_quality(buffer),
            face_quality,
            snr_db: filtered.and_then(|f| self.spectral.snr_db(f)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::{BufferMode, FrameSample};

    #[test]
    fn test_snr_score_formula() {
        // mean 10, population std 2 -> 5 * 10 = 50
        let s = Array1::from(vec![8.0, 12.0, 8.0, 12.0]);
        assert_eq!(snr_score(&s), 50);
    }

    #[test]
    fn test_snr_score_clamps() {
        let bright = Array1::from(vec![127.0, 128.0, 129.0, 128.0]);
        assert_eq!(snr_score(&bright), 100);

        let negative = Array1::from(vec![-8.0, -12.0, -8.0, -12.0]);
        assert_eq!(snr_score(&negative), 0);
    }

    #[test]
    fn test_zero_variance_scores_zero() {
        assert_eq!(snr_score(&Array1::from(vec![90.0; 60])), 0);
        assert_eq!(snr_score(&Array1::from(vec![90.0])), 0);
    }

    #[test]
    fn test_scorer_uses_tail_window() {
        let mut buf = SignalBuffer::new(200, BufferMode::Sliding);
        // 100 noisy samples followed by 60 samples with mean 10, std 2
        for i in 0..100 {
            let g = if i % 2 == 0 { 0.0 } else { 200.0 };
            buf.push(FrameSample::new(i, [g, g, g], FaceQuality::Good));
        }
        for i in 100..160 {
            let g = if i % 2 == 0 { 8.0 } else { 12.0 };
            buf.push(FrameSample::new(i, [g, g, g], FaceQuality::Good));
        }
        let scorer = QualityScorer::new(60, SignalQualityConfig::default());
        assert_eq!(scorer.signal_quality(&buf), 50);
    }

    #[test]
    fn test_report_carries_window_score() {
        let mut buf = SignalBuffer::new(60, BufferMode::SingleShot);
        for i in 0..60 {
            let g = if i % 2 == 0 { 8.0 } else { 12.0 };
            buf.push(FrameSample::new(i, [g, g, g], FaceQuality::Good));
        }
        let mut scorer = QualityScorer::new(60, SignalQualityConfig::default());
        let report = scorer.report(&buf, FaceQuality::Good, None);
        assert_eq!(report.signal_quality, 50);
        assert_eq!(report.face_quality, FaceQuality::Good);
        assert_eq!(report.snr_db, None);
    }
}
