//! Frame source abstraction
//!
//! The camera lives outside this crate. Callers adapt whatever produces
//! frames (platform camera API, video file, test fixture) to [`FrameSource`].

use std::collections::VecDeque;

use super::frame::Frame;
use crate::error::{Result, VitalsError};

pub trait FrameSource: Send {
    /// Acquire the device. Permission denial or a missing camera must be
    /// reported as [`VitalsError::SourceUnavailable`].
    fn open(&mut self) -> Result<()>;

    /// Pull the next frame, if one is ready
    fn next_frame(&mut self) -> Option<Frame>;

    /// Release the device. Must be idempotent.
    fn release(&mut self);
}

/// In-memory source that replays a fixed list of frames
///
/// Useful for offline analysis of recorded clips and for tests.
#[derive(Debug, Default)]
pub struct ReplaySource {
    frames: VecDeque<Frame>,
    open: bool,
    fail_open: Option<String>,
}

impl ReplaySource {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            open: false,
            fail_open: None,
        }
    }

    /// Source whose `open` always fails with the given reason
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            fail_open: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for ReplaySource {
    fn open(&mut self) -> Result<()> {
        if let Some(reason) = &self.fail_open {
            return Err(VitalsError::SourceUnavailable(reason.clone()));
        }
        self.open = true;
        Ok(())
    }

    fn next_frame(&mut self) -> Option<Frame> {
        if !self.open {
            return None;
        }
        self.frames.pop_front()
    }

    fn release(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_requires_open() {
        let mut src = ReplaySource::new(vec![Frame::filled(2, 2, [1, 1, 1], 0)]);
        assert!(src.next_frame().is_none());
        src.open().unwrap();
        assert!(src.next_frame().is_some());
        assert!(src.next_frame().is_none());
    }

    #[test]
    fn test_unavailable_source() {
        let mut src = ReplaySource::unavailable("permission denied");
        let err = src.open().unwrap_err();
        assert!(matches!(err, VitalsError::SourceUnavailable(_)));
        assert!(!src.is_open());
    }
}
