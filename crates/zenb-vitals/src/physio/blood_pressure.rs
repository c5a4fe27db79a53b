//! Blood-pressure heuristic
//!
//! Not a measurement: a population baseline shifted by heart rate and the
//! subject profile, with a little uniform jitter so repeated sessions do not
//! report identical numbers.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::vision::FaceQuality;

pub const SYSTOLIC_RANGE: (u16, u16) = (90, 180);
pub const DIASTOLIC_RANGE: (u16, u16) = (50, 110);
/// Minimum systolic-diastolic gap (mmHg)
pub const MIN_PULSE_PRESSURE: u16 = 30;

const BASE_SYSTOLIC: f32 = 120.0;
const BASE_DIASTOLIC: f32 = 80.0;
const RESTING_BPM: f32 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// Contextual modifiers for the heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectProfile {
    pub age: u32,
    pub gender: Gender,
    pub stressed: bool,
}

impl Default for SubjectProfile {
    fn default() -> Self {
        Self {
            age: 30,
            gender: Gender::Male,
            stressed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: u16,
    pub diastolic: u16,
}

fn face_quality_offset(quality: FaceQuality) -> f32 {
    match quality {
        FaceQuality::Excellent => 0.0,
        FaceQuality::Good => 5.0,
        FaceQuality::Poor | FaceQuality::None => 10.0,
    }
}

/// Estimate systolic/diastolic from heart rate and subject context
///
/// `jitter_mmhg` is the half-width of an independent uniform draw added to
/// each value; zero disables it and leaves `rng` untouched.
pub fn estimate_blood_pressure<R: Rng + ?Sized>(
    bpm: f32,
    subject: &SubjectProfile,
    face_quality: FaceQuality,
    jitter_mmhg: f32,
    rng: &mut R,
) -> BloodPressure {
    let dev = if bpm.is_finite() {
        (bpm - RESTING_BPM).clamp(-25.0, 60.0)
    } else {
        0.0
    };
    let mut sys = BASE_SYSTOLIC + 0.8 * dev;
    let mut dia = BASE_DIASTOLIC + 0.4 * dev;

    let age_effect = ((subject.age as f32 - 30.0) / 1.5).max(0.0);
    sys += age_effect;
    dia += age_effect / 2.0;

    if subject.gender == Gender::Male {
        sys += 5.0;
        dia += 3.0;
    }
    if subject.stressed {
        sys += 10.0;
        dia += 5.0;
    }

    let quality_offset = face_quality_offset(face_quality);
    sys += quality_offset;
    dia += quality_offset / 2.0;

    if jitter_mmhg > 0.0 {
        sys += rng.gen_range(-jitter_mmhg..=jitter_mmhg);
        dia += rng.gen_range(-jitter_mmhg..=jitter_mmhg);
    }

    let sys = sys
        .round()
        .clamp(SYSTOLIC_RANGE.0 as f32, SYSTOLIC_RANGE.1 as f32);
    let dia = dia
        .round()
        .min(sys - MIN_PULSE_PRESSURE as f32)
        .clamp(DIASTOLIC_RANGE.0 as f32, DIASTOLIC_RANGE.1 as f32);

    BloodPressure {
        systolic: sys as u16,
        diastolic: dia as u16,
    }
}
