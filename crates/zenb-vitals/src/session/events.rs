use serde::{Deserialize, Serialize};

use super::reading::VitalsReading;
use super::state::CaptureState;
use crate::error::ErrorKind;
use crate::vision::FaceQuality;

/// Everything the pipeline reports to its caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VitalsEvent {
    /// Smoothed heart rate after an evaluation cycle
    HeartRateUpdate { bpm: u16, raw_bpm: u16 },
    QualityUpdate {
        signal_quality: u8,
        face_quality: FaceQuality,
        snr_db: Option<f32>,
    },
    ProgressUpdate { percent: f32 },
    StateChanged { from: CaptureState, to: CaptureState },
    Completion {
        reading: VitalsReading,
        subscriber_id: Option<String>,
        /// `Some(LowSignalQuality)` when the reading was frozen on a weak signal
        warning: Option<ErrorKind>,
    },
    Error { kind: ErrorKind, message: String },
}

impl VitalsEvent {
    pub fn is_completion(&self) -> bool {
        matches!(self, Self::Completion { .. })
    }
}
