//! Face detection trait and ROI extraction
//!
//! Reduces a frame to one mean RGB triple, either from a fixed geometric
//! region or from a bounding box supplied by an external face detector.

use serde::{Deserialize, Serialize};

use super::frame::Frame;
use crate::config::RoiConfig;
use crate::error::Result;

/// Face detection result
#[derive(Debug, Clone, PartialEq)]
pub struct FaceDetection {
    /// Bounding box [x, y, width, height] in pixels
    pub bbox: [f32; 4],
    /// Detection confidence (0-1)
    pub confidence: f32,
}

/// Pluggable face detection backend
///
/// Implement this to integrate MediaPipe, ARKit or a custom model. At most
/// one face is reported per frame.
pub trait FaceDetector: Send {
    /// Load model weights / warm up. Called once when capture starts.
    fn load(&mut self) -> Result<()> {
        Ok(())
    }

    /// Detect a face in the frame
    fn detect(&mut self, frame: &Frame) -> Option<FaceDetection>;
}

/// Face acquisition quality, ordered worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceQuality {
    None,
    Poor,
    Good,
    Excellent,
}

impl FaceQuality {
    /// Good enough to feed samples into the buffer
    pub fn is_present(self) -> bool {
        self >= FaceQuality::Poor
    }
}

/// ROI extraction strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiMode {
    /// Circle centred on the frame, radius 0.4 * min(width, height)
    Circle,
    /// Rectangle at 25-75% width, 15-45% height
    Forehead,
    /// Bounding box from a [`FaceDetector`]
    Detector,
}

/// Mean colour of the ROI plus its quality
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiMeasurement {
    pub rgb: [f32; 3],
    pub quality: FaceQuality,
}

/// Classify a detector result against the frame it came from
pub fn classify_detection(detection: &FaceDetection, frame_width: u32, frame_height: u32) -> FaceQuality {
    let frame_area = frame_width as f32 * frame_height as f32;
    if frame_area <= 0.0 {
        return FaceQuality::None;
    }

    let [x, y, w, h] = detection.bbox;
    let area_fraction = (w.max(0.0) * h.max(0.0)) / frame_area;

    let dx = (x + w / 2.0) - frame_width as f32 / 2.0;
    let dy = (y + h / 2.0) - frame_height as f32 / 2.0;
    let centering_offset = (dx * dx + dy * dy).sqrt() / frame_width as f32;

    let c = detection.confidence;
    if c > 0.9 && area_fraction > 0.1 && centering_offset < 0.2 {
        FaceQuality::Excellent
    } else if c > 0.7 && area_fraction > 0.05 {
        FaceQuality::Good
    } else {
        FaceQuality::Poor
    }
}

/// Quality proxy for geometric modes: share of ROI pixels that look like skin
fn classify_coverage(accepted: u32, total: u32) -> FaceQuality {
    if total == 0 || accepted == 0 {
        return FaceQuality::None;
    }
    let coverage = accepted as f32 / total as f32;
    if coverage > 0.8 {
        FaceQuality::Excellent
    } else if coverage > 0.5 {
        FaceQuality::Good
    } else {
        FaceQuality::Poor
    }
}

/// Accumulates pixel sums over an ROI
#[derive(Default)]
struct RgbAccumulator {
    sum: [f64; 3],
    accepted: u32,
    total: u32,
}

impl RgbAccumulator {
    fn mean(&self) -> Option<[f32; 3]> {
        if self.accepted == 0 {
            return None;
        }
        let inv = 1.0 / self.accepted as f64;
        Some([
            (self.sum[0] * inv) as f32,
            (self.sum[1] * inv) as f32,
            (self.sum[2] * inv) as f32,
        ])
    }
}

/// ROI extractor
#[derive(Debug, Clone)]
pub struct RoiExtractor {
    config: RoiConfig,
}

impl RoiExtractor {
    /// Create an extractor for the configured ROI mode
    pub fn new(config: RoiConfig) -> Self {
        Self { config }
    }

    /// Active ROI mode
    pub fn mode(&self) -> RoiMode {
        self.config.mode
    }

    /// Extract the ROI mean colour
    ///
    /// In `Detector` mode `detection` must be the detector output for this
    /// frame; `None` means no face and yields no measurement. Geometric modes
    /// ignore it.
    pub fn extract(&self, frame: &Frame, detection: Option<&FaceDetection>) -> Option<RoiMeasurement> {
        match self.config.mode {
            RoiMode::Circle => self.extract_circle(frame),
            RoiMode::Forehead => self.extract_forehead(frame),
            RoiMode::Detector => {
                let detection = detection?;
                let quality = classify_detection(detection, frame.width, frame.height);
                let rgb = Self::box_mean(frame, detection.bbox)?;
                Some(RoiMeasurement { rgb, quality })
            }
        }
    }

    fn extract_circle(&self, frame: &Frame) -> Option<RoiMeasurement> {
        let cx = frame.width as f32 / 2.0;
        let cy = frame.height as f32 / 2.0;
        let radius = 0.4 * frame.width.min(frame.height) as f32;
        let r2 = radius * radius;

        let mut acc = RgbAccumulator::default();
        for y in 0..frame.height {
            let py = y as f32 + 0.5 - cy;
            for x in 0..frame.width {
                let px = x as f32 + 0.5 - cx;
                if px * px + py * py <= r2 {
                    self.accumulate(&mut acc, frame.pixel(x, y));
                }
            }
        }
        self.finish(acc)
    }

    fn extract_forehead(&self, frame: &Frame) -> Option<RoiMeasurement> {
        let x0 = (frame.width as f32 * 0.25) as u32;
        let x1 = (frame.width as f32 * 0.75) as u32;
        let y0 = (frame.height as f32 * 0.15) as u32;
        let y1 = (frame.height as f32 * 0.45) as u32;

        let mut acc = RgbAccumulator::default();
        for y in y0..y1 {
            for x in x0..x1 {
                self.accumulate(&mut acc, frame.pixel(x, y));
            }
        }
        self.finish(acc)
    }

    #[inline]
    fn accumulate(&self, acc: &mut RgbAccumulator, px: [u8; 3]) {
        acc.total += 1;
        let brightness = (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0;
        if brightness < self.config.brightness_min || brightness > self.config.brightness_max {
            return;
        }
        acc.sum[0] += px[0] as f64;
        acc.sum[1] += px[1] as f64;
        acc.sum[2] += px[2] as f64;
        acc.accepted += 1;
    }

    fn finish(&self, acc: RgbAccumulator) -> Option<RoiMeasurement> {
        let rgb = acc.mean()?;
        Some(RoiMeasurement {
            rgb,
            quality: classify_coverage(acc.accepted, acc.total),
        })
    }

    /// Mean over the bounding box clipped to the frame; no brightness gating
    fn box_mean(frame: &Frame, bbox: [f32; 4]) -> Option<[f32; 3]> {
        let [x, y, w, h] = bbox;
        let x0 = x.max(0.0) as u32;
        let y0 = y.max(0.0) as u32;
        let x1 = ((x + w).max(0.0) as u32).min(frame.width);
        let y1 = ((y + h).max(0.0) as u32).min(frame.height);

        let mut acc = RgbAccumulator::default();
        for py in y0..y1 {
            for px in x0..x1 {
                let p = frame.pixel(px, py);
                acc.sum[0] += p[0] as f64;
                acc.sum[1] += p[1] as f64;
                acc.sum[2] += p[2] as f64;
                acc.accepted += 1;
            }
        }
        acc.mean()
    }
}
