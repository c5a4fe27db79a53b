//! Rolling median over the last few BPM estimates
//!
//! Suppresses single-cycle jitter before an estimate becomes "current".

use std::collections::VecDeque;

pub const BPM_MEDIAN_WINDOW: usize = 3;

#[derive(Debug, Clone)]
pub struct BpmSmoother {
    window: usize,
    values: VecDeque<f32>,
}

impl Default for BpmSmoother {
    fn default() -> Self {
        Self::new(BPM_MEDIAN_WINDOW)
    }
}

impl BpmSmoother {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            values: VecDeque::with_capacity(window),
        }
    }

    /// Add a raw estimate and return the median of the retained values
    pub fn add(&mut self, bpm: f32) -> f32 {
        if self.values.len() >= self.window {
            self.values.pop_front();
        }
        self.values.push_back(bpm);
        Self::median(&self.values)
    }

    pub fn current(&self) -> Option<f32> {
        if self.values.is_empty() {
            None
        } else {
            Some(Self::median(&self.values))
        }
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }

    fn median(values: &VecDeque<f32>) -> f32 {
        let mut sorted: Vec<f32> = values.iter().copied().collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let len = sorted.len();
        if len % 2 == 0 {
            (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
        } else {
            sorted[len / 2]
        }
    }
}
