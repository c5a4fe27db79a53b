//! Vitals derived from the pulse signal and heart rate.
//!
//! Notes:
//! - SpO2 uses a visible-light red/green ratio-of-ratios, not the red/IR pair
//!   of a contact oximeter, so it is a coarse estimate.
//! - Blood pressure is a heuristic from HR and subject context only.

mod blood_pressure;
mod spo2;

pub use blood_pressure::{
    estimate_blood_pressure, BloodPressure, Gender, SubjectProfile, DIASTOLIC_RANGE,
    MIN_PULSE_PRESSURE, SYSTOLIC_RANGE,
};
pub use spo2::{spo2_from_channels, Spo2Estimator, SPO2_MAX, SPO2_MIN};
