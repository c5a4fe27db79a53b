use serde::{Deserialize, Serialize};

/// Lifecycle of a capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureState {
    Idle,
    /// Source (and detector) being opened
    Acquiring,
    /// Source open, waiting for a face
    Detecting,
    Measuring,
    /// Reading produced; inert until reset
    Frozen,
}

impl CaptureState {
    /// States that own an open frame source
    pub fn is_active(self) -> bool {
        matches!(self, Self::Acquiring | Self::Detecting | Self::Measuring)
    }

    /// States in which frames are consumed
    pub fn accepts_frames(self) -> bool {
        matches!(self, Self::Detecting | Self::Measuring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_classes() {
        assert!(!CaptureState::Idle.is_active());
        assert!(CaptureState::Acquiring.is_active());
        assert!(!CaptureState::Acquiring.accepts_frames());
        assert!(CaptureState::Measuring.accepts_frames());
        assert!(!CaptureState::Frozen.is_active());
        assert!(!CaptureState::Frozen.accepts_frames());
    }
}
