//! Vision module: frames, throttling and ROI extraction
//!
//! This module provides:
//! - `Frame` for RGB/RGBA pixel data
//! - `FrameSampler` to throttle camera callbacks to the sampling rate
//! - `FaceDetector` trait for pluggable face detection backends
//! - `RoiExtractor` reducing a frame to one mean RGB triple
//! - `FrameSource` trait for the camera collaborator
//!
//! # Design
//!
//! The module is a pure-Rust interface. Face detection results can be
//! injected from external sources (MediaPipe, ARKit, etc.) without adding
//! native dependencies.

mod frame;
mod roi;
mod sampler;
mod source;

pub use frame::{Frame, PixelFormat};
pub use roi::{
    classify_detection, FaceDetection, FaceDetector, FaceQuality, RoiExtractor, RoiMeasurement,
    RoiMode,
};
pub use sampler::FrameSampler;
pub use source::{FrameSource, ReplaySource};
