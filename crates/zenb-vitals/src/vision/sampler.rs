//! Frame-rate throttle
//!
//! Rate-limiting filter, not a buffer: frames arriving before the next slot
//! are dropped.

#[derive(Debug, Clone)]
pub struct FrameSampler {
    min_interval_us: i64,
    last_accepted_us: Option<i64>,
}

impl FrameSampler {
    pub fn new(rate_hz: f32) -> Self {
        let min_interval_us = if rate_hz > 0.0 {
            (1_000_000.0 / rate_hz) as i64
        } else {
            0
        };
        Self {
            min_interval_us,
            last_accepted_us: None,
        }
    }

    /// Returns true if a frame stamped `timestamp_us` should be processed
    pub fn accept(&mut self, timestamp_us: i64) -> bool {
        match self.last_accepted_us {
            Some(last) if timestamp_us - last < self.min_interval_us || timestamp_us < last => {
                false
            }
            _ => {
                self.last_accepted_us = Some(timestamp_us);
                true
            }
        }
    }

    pub fn min_interval_us(&self) -> i64 {
        self.min_interval_us
    }

    pub fn reset(&mut self) {
        self.last_accepted_us = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_always_accepted() {
        let mut sampler = FrameSampler::new(30.0);
        assert!(sampler.accept(123_456));
    }

    #[test]
    fn test_drops_frames_faster_than_rate() {
        let mut sampler = FrameSampler::new(30.0);
        // 60 fps camera -> roughly every other frame survives
        let accepted = (0..60)
            .filter(|i| sampler.accept(i * 16_667))
            .count();
        assert!((29..=31).contains(&accepted), "accepted {}", accepted);
    }

    #[test]
    fn test_rejects_backwards_time() {
        let mut sampler = FrameSampler::new(10.0);
        assert!(sampler.accept(1_000_000));
        assert!(!sampler.accept(500_000));
        assert!(sampler.accept(1_100_000));
    }

    #[test]
    fn test_reset_forgets_last_frame() {
        let mut sampler = FrameSampler::new(30.0);
        assert!(sampler.accept(0));
        assert!(!sampler.accept(1_000));
        sampler.reset();
        assert!(sampler.accept(1_000));
    }
}
