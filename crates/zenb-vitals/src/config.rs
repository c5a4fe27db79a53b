//! Pipeline configuration
//!
//! Loaded from TOML with optional `ZENB_VITALS_*` environment overrides.
//! Every section has a `Default`, so a partial file only needs the keys it
//! changes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::dsp::BufferMode;
use crate::physio::SubjectProfile;
use crate::rppg::EstimatorKind;
use crate::vision::RoiMode;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// ROI extraction settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoiConfig {
    pub mode: RoiMode,
    /// Pixels with mean brightness below this are rejected (geometric modes)
    pub brightness_min: f32,
    /// Pixels with mean brightness above this are rejected (geometric modes)
    pub brightness_max: f32,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            mode: RoiMode::Forehead,
            brightness_min: 50.0,
            brightness_max: 200.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VitalsConfig {
    /// Target frame sampling rate (Hz)
    pub sampling_rate_hz: f32,
    /// Evaluation window for the time-domain estimator (seconds)
    pub window_seconds: f32,
    /// Heart-rate estimation strategy
    pub estimator: EstimatorKind,
    /// Buffer behaviour; `None` picks the strategy default
    pub buffer_mode: Option<BufferMode>,
    /// Window length for the spectral estimator (samples, padded to 2^k)
    pub spectral_window: usize,
    /// Lower edge of the physiological band (Hz)
    pub min_hz: f32,
    /// Upper edge of the physiological band (Hz)
    pub max_hz: f32,
    /// Leaky-integrator coefficient of the high-pass stage
    pub highpass_alpha: f32,
    /// Exponential-smoothing coefficient of the low-pass stage
    pub lowpass_alpha: f32,
    /// Progress percentage added per tick
    pub progress_step: f32,
    /// Half-width of the uniform blood-pressure jitter (mmHg)
    pub bp_jitter_mmhg: f32,
    /// Fixed seed for the jitter RNG (reproducible sessions)
    pub rng_seed: Option<u64>,
    /// Completion quality below this is reported as a warning
    pub quality_warning_threshold: u8,
    /// Samples used for the SpO2 ratio-of-ratios
    pub spo2_window: usize,
    /// Samples used for the signal-quality score
    pub quality_window: usize,
    /// Bound of the controller command queue
    pub command_capacity: usize,
    // Tables last so the TOML serializer emits scalars first
    pub roi: RoiConfig,
    pub subject: SubjectProfile,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            sampling_rate_hz: 30.0,
            window_seconds: 6.0,
            estimator: EstimatorKind::ZeroCrossing,
            buffer_mode: None,
            spectral_window: 256,
            min_hz: 0.75,
            max_hz: 3.0,
            highpass_alpha: 0.1,
            lowpass_alpha: 0.1,
            progress_step: 2.0,
            bp_jitter_mmhg: 3.0,
            rng_seed: None,
            quality_warning_threshold: 50,
            spo2_window: 128,
            quality_window: 60,
            command_capacity: 64,
            roi: RoiConfig::default(),
            subject: SubjectProfile::default(),
        }
    }
}

impl VitalsConfig {
    /// Preset for the FFT peak-picking strategy
    pub fn spectral() -> Self {
        Self {
            estimator: EstimatorKind::Spectral,
            ..Self::default()
        }
    }

    /// Buffer mode in effect: sliding for zero-crossing, single-shot for spectral
    pub fn effective_buffer_mode(&self) -> BufferMode {
        self.buffer_mode.unwrap_or(match self.estimator {
            EstimatorKind::ZeroCrossing => BufferMode::Sliding,
            EstimatorKind::Spectral => BufferMode::SingleShot,
        })
    }

    /// Samples held by the signal window, and required before first evaluation
    pub fn buffer_capacity(&self) -> usize {
        match self.estimator {
            EstimatorKind::ZeroCrossing => {
                (self.sampling_rate_hz * self.window_seconds).round() as usize
            }
            EstimatorKind::Spectral => self.spectral_window,
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: VitalsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    /// Environment variables are prefixed with ZENB_VITALS_
    /// Example: ZENB_VITALS_SAMPLING_RATE_HZ=25
    pub fn from_file_with_env<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub(crate) fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        use std::env;

        if let Ok(val) = env::var("ZENB_VITALS_SAMPLING_RATE_HZ") {
            self.sampling_rate_hz = val.parse().map_err(|_| {
                ConfigError::Validation("Invalid ZENB_VITALS_SAMPLING_RATE_HZ".to_string())
            })?;
        }
        if let Ok(val) = env::var("ZENB_VITALS_WINDOW_SECONDS") {
            self.window_seconds = val.parse().map_err(|_| {
                ConfigError::Validation("Invalid ZENB_VITALS_WINDOW_SECONDS".to_string())
            })?;
        }
        if let Ok(val) = env::var("ZENB_VITALS_ESTIMATOR") {
            self.estimator = match val.to_ascii_lowercase().as_str() {
                "zero_crossing" => EstimatorKind::ZeroCrossing,
                "spectral" => EstimatorKind::Spectral,
                _ => {
                    return Err(ConfigError::Validation(
                        "Invalid ZENB_VITALS_ESTIMATOR (expected zero_crossing|spectral)"
                            .to_string(),
                    ))
                }
            };
        }
        if let Ok(val) = env::var("ZENB_VITALS_SUBJECT_AGE") {
            self.subject.age = val.parse().map_err(|_| {
                ConfigError::Validation("Invalid ZENB_VITALS_SUBJECT_AGE".to_string())
            })?;
        }
        if let Ok(val) = env::var("ZENB_VITALS_RNG_SEED") {
            self.rng_seed = Some(val.parse().map_err(|_| {
                ConfigError::Validation("Invalid ZENB_VITALS_RNG_SEED".to_string())
            })?);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sampling_rate_hz > 0.0) {
            return Err(ConfigError::Validation(
                "sampling_rate_hz must be positive".to_string(),
            ));
        }
        if !(self.window_seconds > 0.0) {
            return Err(ConfigError::Validation(
                "window_seconds must be positive".to_string(),
            ));
        }
        if !(self.min_hz > 0.0) || self.min_hz >= self.max_hz {
            return Err(ConfigError::Validation(
                "min_hz must be in (0, max_hz)".to_string(),
            ));
        }
        if self.max_hz >= self.sampling_rate_hz / 2.0 {
            return Err(ConfigError::Validation(
                "max_hz must be below the Nyquist frequency".to_string(),
            ));
        }
        for (name, alpha) in [
            ("highpass_alpha", self.highpass_alpha),
            ("lowpass_alpha", self.lowpass_alpha),
        ] {
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(ConfigError::Validation(format!("{name} must be in (0, 1]")));
            }
        }
        if self.buffer_capacity() < self.spo2_window {
            return Err(ConfigError::Validation(format!(
                "buffer capacity {} is smaller than spo2_window {}",
                self.buffer_capacity(),
                self.spo2_window
            )));
        }
        if self.quality_window < 2 {
            return Err(ConfigError::Validation(
                "quality_window must be at least 2".to_string(),
            ));
        }
        if self.roi.brightness_min >= self.roi.brightness_max {
            return Err(ConfigError::Validation(
                "roi.brightness_min must be below roi.brightness_max".to_string(),
            ));
        }
        if !(self.progress_step > 0.0 && self.progress_step <= 100.0) {
            return Err(ConfigError::Validation(
                "progress_step must be in (0, 100]".to_string(),
            ));
        }
        if self.bp_jitter_mmhg < 0.0 {
            return Err(ConfigError::Validation(
                "bp_jitter_mmhg must be non-negative".to_string(),
            ));
        }
        if self.command_capacity == 0 {
            return Err(ConfigError::Validation(
                "command_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
