//! Final output of a capture session

use serde::{Deserialize, Serialize};

use crate::error::{Result, VitalsError};

/// One frozen vitals measurement, handed to the caller by value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsReading {
    pub heart_rate_bpm: u16,
    pub oxygen_saturation_pct: f32,
    pub systolic: u16,
    pub diastolic: u16,
    /// Signal quality at freeze time, 0-100
    pub quality_score: u8,
    /// Capture timestamp of the last processed frame (µs)
    pub computed_at_us: i64,
}

impl VitalsReading {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// `LowSignalQuality` when the score is below `threshold`
    pub fn check_quality(&self, threshold: u8) -> Result<()> {
        if self.quality_score < threshold {
            return Err(VitalsError::LowSignalQuality {
                score: self.quality_score,
            });
        }
        Ok(())
    }
}
