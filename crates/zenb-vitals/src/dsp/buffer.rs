//! Bounded, time-ordered window of ROI samples

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::vision::FaceQuality;

/// One accepted frame reduced to its ROI mean colour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    /// Monotonic capture time (µs)
    pub timestamp_us: i64,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub roi_quality: FaceQuality,
}

impl FrameSample {
    pub fn new(timestamp_us: i64, rgb: [f32; 3], roi_quality: FaceQuality) -> Self {
        Self {
            timestamp_us,
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            roi_quality,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// How the window behaves once it has been evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferMode {
    /// Oldest sample is evicted for each new one once full
    Sliding,
    /// Window is consumed by one evaluation and then cleared
    SingleShot,
}

#[derive(Debug, Clone)]
pub struct SignalBuffer {
    samples: VecDeque<FrameSample>,
    capacity: usize,
    mode: BufferMode,
}

impl SignalBuffer {
    pub fn new(capacity: usize, mode: BufferMode) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            mode,
        }
    }

    /// Append a sample. Out-of-order timestamps are rejected.
    pub fn push(&mut self, sample: FrameSample) -> bool {
        if let Some(last) = self.samples.back() {
            if sample.timestamp_us < last.timestamp_us {
                return false;
            }
        }
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        true
    }

    /// Called after an evaluation cycle; single-shot windows start over
    pub fn mark_evaluated(&mut self) {
        if self.mode == BufferMode::SingleShot {
            self.samples.clear();
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn mode(&self) -> BufferMode {
        self.mode
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameSample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&FrameSample> {
        self.samples.back()
    }

    /// Copy of the buffered samples, oldest first
    pub fn snapshot(&self) -> Vec<FrameSample> {
        self.samples.iter().copied().collect()
    }

    /// Full channel series
    pub fn channel(&self, channel: Channel) -> Array1<f32> {
        self.channel_tail(channel, self.samples.len())
    }

    /// The last `n` values of a channel (fewer if not buffered yet)
    pub fn channel_tail(&self, channel: Channel, n: usize) -> Array1<f32> {
        let skip = self.samples.len().saturating_sub(n);
        self.samples
            .iter()
            .skip(skip)
            .map(|s| match channel {
                Channel::Red => s.r,
                Channel::Green => s.g,
                Channel::Blue => s.b,
            })
            .collect()
    }
}
