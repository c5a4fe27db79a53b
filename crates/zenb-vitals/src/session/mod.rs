//! Capture lifecycle and the command/event surface around it
//!
//! - `CaptureSession` - owned state machine for one measurement
//! - `CaptureController` - bounded command queue feeding a session
//! - `VitalsEvent` / `VitalsReading` - what the caller receives

mod capture;
mod controller;
mod events;
mod reading;
mod state;

pub use capture::CaptureSession;
pub use controller::{
    CaptureCommand, CaptureController, CaptureHandle, CommandError, ControllerMetrics,
    MetricsSnapshot, ReadingSink,
};
pub use events::VitalsEvent;
pub use reading::VitalsReading;
pub use state::CaptureState;
