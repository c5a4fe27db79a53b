//! Error types for the vitals pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum VitalsError {
    /// Camera / frame source missing or permission denied
    #[error("Frame source unavailable: {0}")]
    SourceUnavailable(String),

    /// External face-landmark model could not be loaded
    #[error("Face detector failed to load: {0}")]
    DetectorLoadFailure(String),

    /// Not enough buffered samples for an estimation cycle
    #[error("Insufficient signal: have {have} samples, need {need}")]
    InsufficientSignal { have: usize, need: usize },

    /// Zero-variance input; no estimate can be derived
    #[error("Degenerate signal (zero variance)")]
    DegenerateSignal,

    /// Signal quality below the warning threshold at completion
    #[error("Low signal quality: {score}/100")]
    LowSignalQuality { score: u8 },

    /// Frame buffer inconsistent with its declared dimensions
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Copyable error discriminant carried on [`crate::session::VitalsEvent::Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    SourceUnavailable,
    DetectorLoadFailure,
    InsufficientSignal,
    DegenerateSignal,
    LowSignalQuality,
    InvalidFrame,
    Config,
    Serialization,
}

impl VitalsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceUnavailable(_) => ErrorKind::SourceUnavailable,
            Self::DetectorLoadFailure(_) => ErrorKind::DetectorLoadFailure,
            Self::InsufficientSignal { .. } => ErrorKind::InsufficientSignal,
            Self::DegenerateSignal => ErrorKind::DegenerateSignal,
            Self::LowSignalQuality { .. } => ErrorKind::LowSignalQuality,
            Self::InvalidFrame(_) => ErrorKind::InvalidFrame,
            Self::Config(_) => ErrorKind::Config,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Errors that end the session rather than skipping one estimation cycle
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable(_) | Self::DetectorLoadFailure(_)
        )
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, VitalsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_kinds() {
        assert!(VitalsError::SourceUnavailable("denied".into()).is_fatal());
        assert!(VitalsError::DetectorLoadFailure("missing".into()).is_fatal());
        assert!(!VitalsError::DegenerateSignal.is_fatal());
        assert!(!VitalsError::InsufficientSignal { have: 3, need: 180 }.is_fatal());
    }

    #[test]
    fn display_includes_counts() {
        let err = VitalsError::InsufficientSignal { have: 12, need: 180 };
        assert_eq!(err.to_string(), "Insufficient signal: have 12 samples, need 180");
        assert_eq!(err.kind(), ErrorKind::InsufficientSignal);
    }
}
