//! # zenb-vitals
//!
//! Camera-based vitals estimation for ZenB.
//!
//! This crate provides:
//! - **Vision**: frame throttling and ROI extraction (geometric or detector-assisted)
//! - **DSP**: signal window, detrend/normalize/band-limit, radix-2 FFT, quality scoring
//! - **rPPG**: zero-crossing and spectral heart-rate estimators
//! - **Physio**: SpO2 ratio-of-ratios and a blood-pressure heuristic
//! - **Session**: the capture state machine and its command queue
//!
//! ## Example
//!
//! ```ignore
//! use zenb_vitals::{CaptureController, CaptureSession, VitalsConfig, VitalsEvent};
//!
//! let session = CaptureSession::new(VitalsConfig::default(), Box::new(camera))?;
//! let mut controller = CaptureController::new(session);
//! let handle = controller.handle();
//! let events = controller.events();
//!
//! handle.start()?;
//! // from the camera callback: handle.push_frame(frame)?;
//! // from a 1 s timer:         handle.tick()?;
//! controller.pump();
//!
//! for event in events.try_iter() {
//!     if let VitalsEvent::Completion { reading, .. } = event {
//!         println!("{} bpm, SpO2 {}%", reading.heart_rate_bpm, reading.oxygen_saturation_pct);
//!     }
//! }
//! ```

pub mod config;
pub mod dsp;
pub mod error;
pub mod physio;
pub mod rppg;
pub mod session;
pub mod vision;

pub use config::{ConfigError, RoiConfig, VitalsConfig};
pub use error::{ErrorKind, Result, VitalsError};
pub use physio::{BloodPressure, Gender, SubjectProfile};
pub use rppg::{EstimatorKind, FrequencyEstimator};
pub use session::{
    CaptureCommand, CaptureController, CaptureHandle, CaptureSession, CaptureState,
    ReadingSink, VitalsEvent, VitalsReading,
};
pub use vision::{FaceDetection, FaceDetector, FaceQuality, Frame, FrameSource, RoiMode};
