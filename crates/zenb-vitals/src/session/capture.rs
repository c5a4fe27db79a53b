//! Capture session: the single owner of one measurement's state
//!
//! Frames and ticks drive an `Idle -> Acquiring -> Detecting -> Measuring ->
//! Frozen` lifecycle. Each accepted frame is reduced to a ROI sample; once
//! the window is full every new sample triggers an estimation cycle
//! (sliding mode) or the whole window is consumed by one cycle
//! (single-shot mode). The session freezes exactly once, when progress has
//! reached 100% and every vital has been computed at least once.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::events::VitalsEvent;
use super::reading::VitalsReading;
use super::state::CaptureState;
use crate::config::VitalsConfig;
use crate::dsp::{
    BpmSmoother, Channel, FrameSample, PreprocessConfig, Preprocessor, QualityScorer,
    SignalBuffer, SignalQualityConfig,
};
use crate::error::Result;
use crate::physio::{estimate_blood_pressure, BloodPressure, Spo2Estimator};
use crate::rppg::{build_estimator, FrequencyEstimator};
use crate::vision::{
    FaceDetector, FaceQuality, Frame, FrameSampler, FrameSource, RoiExtractor, RoiMode,
};

pub struct CaptureSession {
    config: VitalsConfig,
    state: CaptureState,

    source: Box<dyn FrameSource>,
    detector: Option<Box<dyn FaceDetector>>,
    subscriber_id: Option<String>,

    sampler: FrameSampler,
    roi: RoiExtractor,
    buffer: SignalBuffer,
    preprocessor: Preprocessor,
    estimator: Box<dyn FrequencyEstimator>,
    smoother: BpmSmoother,
    scorer: QualityScorer,
    spo2_estimator: Spo2Estimator,
    rng: StdRng,

    started_at_us: Option<i64>,
    last_frame_us: Option<i64>,
    face_quality: FaceQuality,
    progress: f32,
    readings_history: Vec<u16>,
    quality_score: u8,
    snr_db: Option<f32>,
    heart_rate: Option<u16>,
    spo2: Option<f32>,
    blood_pressure: Option<BloodPressure>,
    frozen_reading: Option<VitalsReading>,

    events: Vec<VitalsEvent>,
}

impl CaptureSession {
    pub fn new(config: VitalsConfig, source: Box<dyn FrameSource>) -> Result<Self> {
        config.validate()?;

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let spectral = SignalQualityConfig {
            sample_rate: config.sampling_rate_hz,
            min_freq: config.min_hz,
            max_freq: config.max_hz,
        };

        Ok(Self {
            state: CaptureState::Idle,
            source,
            detector: None,
            subscriber_id: None,
            sampler: FrameSampler::new(config.sampling_rate_hz),
            roi: RoiExtractor::new(config.roi.clone()),
            buffer: SignalBuffer::new(config.buffer_capacity(), config.effective_buffer_mode()),
            preprocessor: Preprocessor::new(PreprocessConfig {
                highpass_alpha: config.highpass_alpha,
                lowpass_alpha: config.lowpass_alpha,
            }),
            estimator: build_estimator(&config),
            smoother: BpmSmoother::default(),
            scorer: QualityScorer::new(config.quality_window, spectral),
            spo2_estimator: Spo2Estimator::new(config.spo2_window),
            rng,
            started_at_us: None,
            last_frame_us: None,
            face_quality: FaceQuality::None,
            progress: 0.0,
            readings_history: Vec::new(),
            quality_score: 0,
            snr_db: None,
            heart_rate: None,
            spo2: None,
            blood_pressure: None,
            frozen_reading: None,
            events: Vec::new(),
            config,
        })
    }

    /// Attach the external face-landmark detector used in `RoiMode::Detector`
    pub fn with_detector(mut self, detector: Box<dyn FaceDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Identifier carried on the completion event for the caller's sink
    pub fn with_subscriber(mut self, subscriber_id: impl Into<String>) -> Self {
        self.subscriber_id = Some(subscriber_id.into());
        self
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Open the source and detector. A no-op outside `Idle`.
    pub fn start(&mut self) -> Result<()> {
        if self.state != CaptureState::Idle {
            log::debug!("start ignored in state {:?}", self.state);
            return Ok(());
        }
        self.transition(CaptureState::Acquiring);

        if let Err(e) = self.open_devices() {
            log::error!("capture start failed: {}", e);
            self.emit(VitalsEvent::Error {
                kind: e.kind(),
                message: e.to_string(),
            });
            self.source.release();
            self.transition(CaptureState::Idle);
            return Err(e);
        }

        self.sampler.reset();
        self.transition(CaptureState::Detecting);
        Ok(())
    }

    fn open_devices(&mut self) -> Result<()> {
        self.source.open()?;
        match self.detector.as_mut() {
            Some(detector) => detector.load()?,
            None if self.roi.mode() == RoiMode::Detector => {
                log::warn!("detector ROI mode without a detector; no face will be found");
            }
            None => {}
        }
        Ok(())
    }

    /// Abort an in-progress measurement. Frozen and idle sessions are untouched.
    pub fn stop(&mut self) {
        if !self.state.is_active() {
            return;
        }
        self.source.release();
        self.clear_measurement();
        self.transition(CaptureState::Idle);
    }

    /// Discard everything, including a frozen reading, and return to `Idle`
    pub fn reset(&mut self) {
        self.source.release();
        self.clear_measurement();
        self.frozen_reading = None;
        self.transition(CaptureState::Idle);
    }

    fn clear_measurement(&mut self) {
        self.sampler.reset();
        self.buffer.clear();
        self.smoother.reset();
        self.started_at_us = None;
        self.last_frame_us = None;
        self.face_quality = FaceQuality::None;
        self.progress = 0.0;
        self.readings_history.clear();
        self.quality_score = 0;
        self.snr_db = None;
        self.heart_rate = None;
        self.spo2 = None;
        self.blood_pressure = None;
    }

    fn transition(&mut self, to: CaptureState) {
        if self.state == to {
            return;
        }
        let from = self.state;
        self.state = to;
        log::info!("capture state {:?} -> {:?}", from, to);
        self.emit(VitalsEvent::StateChanged { from, to });
    }

    fn emit(&mut self, event: VitalsEvent) {
        self.events.push(event);
    }

    // ------------------------------------------------------------------
    // Frame / tick handling
    // ------------------------------------------------------------------

    /// Pull one frame from the source and process it. Returns false when
    /// the session is not consuming frames or the source had none.
    pub fn poll_frame(&mut self) -> bool {
        if !self.state.accepts_frames() {
            return false;
        }
        match self.source.next_frame() {
            Some(frame) => {
                self.process_frame(&frame);
                true
            }
            None => false,
        }
    }

    /// Throttle, extract the ROI and feed the buffer
    pub fn process_frame(&mut self, frame: &Frame) {
        if !self.state.accepts_frames() {
            return;
        }
        if !self.sampler.accept(frame.timestamp_us) {
            log::trace!("frame at {}us dropped by sampler", frame.timestamp_us);
            return;
        }

        let detection = match self.roi.mode() {
            RoiMode::Detector => self.detector.as_mut().and_then(|d| d.detect(frame)),
            RoiMode::Circle | RoiMode::Forehead => None,
        };
        match self.roi.extract(frame, detection.as_ref()) {
            Some(m) => self.accept_measurement(frame.timestamp_us, m.rgb, m.quality),
            None => self.accept_measurement(frame.timestamp_us, [0.0; 3], FaceQuality::None),
        }
    }

    /// Feed a ROI mean computed elsewhere (e.g. by a mobile SDK)
    pub fn inject_sample(&mut self, rgb: [f32; 3], timestamp_us: i64, quality: FaceQuality) {
        if !self.state.accepts_frames() {
            return;
        }
        self.accept_measurement(timestamp_us, rgb, quality);
    }

    fn accept_measurement(&mut self, timestamp_us: i64, rgb: [f32; 3], quality: FaceQuality) {
        self.last_frame_us = Some(timestamp_us);
        self.set_face_quality(quality);

        if quality.is_present() {
            if self.state == CaptureState::Detecting {
                self.started_at_us = Some(timestamp_us);
                self.transition(CaptureState::Measuring);
            }
            if self.buffer.push(FrameSample::new(timestamp_us, rgb, quality)) {
                // after a clear the score of the last full window holds
                // until a new quality window has been buffered
                if self.buffer.len() >= self.quality_window() {
                    self.quality_score = self.scorer.signal_quality(&self.buffer);
                }
                if self.buffer.is_full() {
                    self.evaluate();
                }
            } else {
                log::debug!("out-of-order sample at {}us rejected", timestamp_us);
            }
        }

        self.check_completion();
    }

    fn quality_window(&self) -> usize {
        self.config.quality_window.min(self.buffer.capacity()).max(2)
    }

    fn set_face_quality(&mut self, quality: FaceQuality) {
        if quality == self.face_quality {
            return;
        }
        if self.state == CaptureState::Measuring {
            if !quality.is_present() {
                log::info!("face lost; sampling paused");
            } else if !self.face_quality.is_present() && !self.buffer.is_empty() {
                // estimators assume contiguous samples
                log::info!(
                    "face reacquired; dropping {} samples from before the gap",
                    self.buffer.len()
                );
                self.buffer.clear();
            }
        }
        self.face_quality = quality;
        self.emit_quality();
    }

    fn emit_quality(&mut self) {
        self.emit(VitalsEvent::QualityUpdate {
            signal_quality: self.quality_score,
            face_quality: self.face_quality,
            snr_db: self.snr_db,
        });
    }

    /// Advance progress while a face is visible
    pub fn tick(&mut self) {
        if self.state != CaptureState::Measuring {
            return;
        }
        if self.face_quality.is_present() && self.progress < 100.0 {
            self.progress = (self.progress + self.config.progress_step).min(100.0);
            self.emit(VitalsEvent::ProgressUpdate {
                percent: self.progress,
            });
        }
        self.check_completion();
    }

    // ------------------------------------------------------------------
    // Estimation
    // ------------------------------------------------------------------

    /// One estimation cycle over the current window
    fn evaluate(&mut self) {
        let green = self.buffer.channel(Channel::Green);
        let rate = self.config.sampling_rate_hz;

        let cycle = self.preprocessor.run(&green).and_then(|filtered| {
            let raw = self.estimator.estimate(&filtered, rate)?;
            Ok((filtered, raw))
        });

        match cycle {
            Ok((filtered, raw)) => {
                self.readings_history.push(raw.bpm);
                let bpm = self
                    .estimator
                    .kind()
                    .clamp_bpm(self.smoother.add(raw.bpm as f32));
                self.heart_rate = Some(bpm);
                self.emit(VitalsEvent::HeartRateUpdate {
                    bpm,
                    raw_bpm: raw.bpm,
                });

                let report = self.scorer.report(&self.buffer, self.face_quality, Some(&filtered));
                self.quality_score = report.signal_quality;
                self.snr_db = report.snr_db;
                self.emit_quality();

                self.update_derived(bpm);
            }
            Err(e) => {
                self.quality_score = self.scorer.signal_quality(&self.buffer);
                log::debug!("estimation cycle skipped: {}", e);
            }
        }

        self.buffer.mark_evaluated();
    }

    fn update_derived(&mut self, bpm: u16) {
        match self
            .spo2_estimator
            .estimate(&self.buffer, bpm as f32, self.quality_score)
        {
            Ok(spo2) => self.spo2 = Some(spo2),
            Err(e) => log::debug!("SpO2 skipped: {}", e),
        }

        let bp = estimate_blood_pressure(
            bpm as f32,
            &self.config.subject,
            self.face_quality,
            self.config.bp_jitter_mmhg,
            &mut self.rng,
        );
        self.blood_pressure = Some(bp);
    }

    fn check_completion(&mut self) {
        if self.state != CaptureState::Measuring || self.progress < 100.0 {
            return;
        }
        if let (Some(hr), Some(spo2), Some(bp)) = (self.heart_rate, self.spo2, self.blood_pressure)
        {
            self.freeze(VitalsReading {
                heart_rate_bpm: hr,
                oxygen_saturation_pct: spo2,
                systolic: bp.systolic,
                diastolic: bp.diastolic,
                quality_score: self.quality_score,
                computed_at_us: self.last_frame_us.unwrap_or_default(),
            });
        }
    }

    fn freeze(&mut self, reading: VitalsReading) {
        if self.frozen_reading.is_some() {
            return;
        }
        self.frozen_reading = Some(reading.clone());
        self.source.release();
        self.transition(CaptureState::Frozen);

        let warning = match reading.check_quality(self.config.quality_warning_threshold) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("reading frozen with {}", e);
                Some(e.kind())
            }
        };
        log::info!(
            "reading frozen: {} bpm, SpO2 {}%, BP {}/{}",
            reading.heart_rate_bpm,
            reading.oxygen_saturation_pct,
            reading.systolic,
            reading.diastolic
        );
        self.emit(VitalsEvent::Completion {
            reading,
            subscriber_id: self.subscriber_id.clone(),
            warning,
        });
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Take the events emitted since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<VitalsEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn config(&self) -> &VitalsConfig {
        &self.config
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn quality_score(&self) -> u8 {
        self.quality_score
    }

    pub fn face_quality(&self) -> FaceQuality {
        self.face_quality
    }

    /// Copy of the buffered samples
    pub fn raw_signal(&self) -> Vec<FrameSample> {
        self.buffer.snapshot()
    }

    /// Unsmoothed BPM of every successful cycle, oldest first
    pub fn readings_history(&self) -> &[u16] {
        &self.readings_history
    }

    pub fn frozen_reading(&self) -> Option<&VitalsReading> {
        self.frozen_reading.as_ref()
    }

    pub fn heart_rate(&self) -> Option<u16> {
        self.heart_rate
    }

    pub fn spo2(&self) -> Option<f32> {
        self.spo2
    }

    pub fn blood_pressure(&self) -> Option<BloodPressure> {
        self.blood_pressure
    }

    pub fn started_at_us(&self) -> Option<i64> {
        self.started_at_us
    }
}

impl std::fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("state", &self.state)
            .field("progress", &self.progress)
            .field("buffered", &self.buffer.len())
            .field("heart_rate", &self.heart_rate)
            .field("frozen", &self.frozen_reading.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::BufferMode;
    use crate::error::{ErrorKind, VitalsError};
    use crate::vision::{FaceDetection, ReplaySource};
    use std::f32::consts::PI;

    const FRAME_US: i64 = 33_334;

    fn config() -> VitalsConfig {
        VitalsConfig {
            rng_seed: Some(1),
            progress_step: 50.0,
            ..VitalsConfig::default()
        }
    }

    fn session(config: VitalsConfig) -> CaptureSession {
        CaptureSession::new(config, Box::new(ReplaySource::new(Vec::new()))).unwrap()
    }

    /// Green channel carrying a 1.2 Hz pulse; red with a weaker one
    fn pulse(i: usize) -> [f32; 3] {
        let p = (2.0 * PI * 1.2 * i as f32 / 30.0).sin();
        [150.0 + 0.5 * p, 120.0 + 2.0 * p, 100.0]
    }

    fn feed(s: &mut CaptureSession, range: std::ops::Range<usize>, quality: FaceQuality) {
        for i in range {
            s.inject_sample(pulse(i), i as i64 * FRAME_US, quality);
        }
    }

    fn states(events: &[VitalsEvent]) -> Vec<(CaptureState, CaptureState)> {
        events
            .iter()
            .filter_map(|e| match e {
                VitalsEvent::StateChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_start_moves_to_detecting() {
        let mut s = session(config());
        s.start().unwrap();
        assert_eq!(s.state(), CaptureState::Detecting);
        assert_eq!(
            states(&s.drain_events()),
            vec![
                (CaptureState::Idle, CaptureState::Acquiring),
                (CaptureState::Acquiring, CaptureState::Detecting),
            ]
        );

        // second start is a no-op
        s.start().unwrap();
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_source_failure_returns_to_idle() {
        let mut s = CaptureSession::new(
            config(),
            Box::new(ReplaySource::unavailable("permission denied")),
        )
        .unwrap();
        assert!(matches!(s.start(), Err(VitalsError::SourceUnavailable(_))));
        assert_eq!(s.state(), CaptureState::Idle);

        let events = s.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            VitalsEvent::Error {
                kind: ErrorKind::SourceUnavailable,
                ..
            }
        )));
    }

    struct BrokenDetector;

    impl FaceDetector for BrokenDetector {
        fn load(&mut self) -> Result<()> {
            Err(VitalsError::DetectorLoadFailure("model missing".into()))
        }

        fn detect(&mut self, _frame: &Frame) -> Option<FaceDetection> {
            None
        }
    }

    #[test]
    fn test_detector_failure_is_fatal() {
        let mut s = session(config()).with_detector(Box::new(BrokenDetector));
        let err = s.start().unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(s.state(), CaptureState::Idle);
    }

    #[test]
    fn test_no_face_keeps_detecting() {
        let mut s = session(config());
        s.start().unwrap();
        feed(&mut s, 0..10, FaceQuality::None);
        assert_eq!(s.state(), CaptureState::Detecting);
        assert!(s.raw_signal().is_empty());

        feed(&mut s, 10..11, FaceQuality::Poor);
        assert_eq!(s.state(), CaptureState::Measuring);
        assert_eq!(s.raw_signal().len(), 1);
        assert_eq!(s.started_at_us(), Some(10 * FRAME_US));
    }

    #[test]
    fn test_buffer_never_exceeds_capacity() {
        let mut s = session(config());
        s.start().unwrap();
        feed(&mut s, 0..400, FaceQuality::Good);
        assert_eq!(s.raw_signal().len(), 180);
        // sliding: one cycle per sample once the window is full
        assert_eq!(s.readings_history().len(), 400 - 180 + 1);
    }

    #[test]
    fn test_tick_requires_measuring_and_face() {
        let mut s = session(config());
        s.tick();
        assert_eq!(s.progress(), 0.0);

        s.start().unwrap();
        feed(&mut s, 0..5, FaceQuality::Good);
        s.tick();
        assert_eq!(s.progress(), 50.0);

        feed(&mut s, 5..6, FaceQuality::None);
        s.tick();
        assert_eq!(s.progress(), 50.0);
    }

    #[test]
    fn test_freezes_once_all_vitals_present() {
        let mut s = session(config());
        s.start().unwrap();
        feed(&mut s, 0..10, FaceQuality::Good);
        s.tick();
        s.tick();
        // progress complete but no vitals yet
        assert_eq!(s.progress(), 100.0);
        assert_eq!(s.state(), CaptureState::Measuring);

        feed(&mut s, 10..180, FaceQuality::Good);
        assert_eq!(s.state(), CaptureState::Frozen);
        let reading = s.frozen_reading().cloned().unwrap();
        assert!((40..=180).contains(&reading.heart_rate_bpm));
        assert_eq!(reading.computed_at_us, 179 * FRAME_US);

        let completions = s
            .drain_events()
            .into_iter()
            .filter(VitalsEvent::is_completion)
            .count();
        assert_eq!(completions, 1);

        // frozen sessions ignore further input
        feed(&mut s, 180..200, FaceQuality::Good);
        s.tick();
        assert_eq!(s.raw_signal().len(), 180);
        assert!(s.drain_events().is_empty());
        assert_eq!(s.frozen_reading(), Some(&reading));
    }

    #[test]
    fn test_stop_discards_measurement() {
        let mut s = session(config());
        s.start().unwrap();
        feed(&mut s, 0..50, FaceQuality::Good);
        s.stop();
        assert_eq!(s.state(), CaptureState::Idle);
        assert!(s.raw_signal().is_empty());
        assert_eq!(s.progress(), 0.0);
    }

    #[test]
    fn test_stop_keeps_frozen_reading_until_reset() {
        let mut s = session(config());
        s.start().unwrap();
        feed(&mut s, 0..2, FaceQuality::Good);
        s.tick();
        s.tick();
        feed(&mut s, 2..180, FaceQuality::Good);
        assert_eq!(s.state(), CaptureState::Frozen);

        s.stop();
        assert_eq!(s.state(), CaptureState::Frozen);
        assert!(s.frozen_reading().is_some());

        s.reset();
        assert_eq!(s.state(), CaptureState::Idle);
        assert!(s.frozen_reading().is_none());
        assert!(s.readings_history().is_empty());
        assert!(s.heart_rate().is_none());
    }

    #[test]
    fn test_single_shot_clears_after_cycle() {
        let cfg = VitalsConfig {
            buffer_mode: Some(BufferMode::SingleShot),
            ..config()
        };
        let mut s = session(cfg);
        s.start().unwrap();
        feed(&mut s, 0..180, FaceQuality::Good);
        assert!(s.raw_signal().is_empty());
        assert_eq!(s.readings_history().len(), 1);
        assert!(s.spo2().is_some());
    }

    #[test]
    fn test_short_frame_data_is_not_a_face() {
        let mut s = session(config());
        s.start().unwrap();
        let frame = Frame {
            data: vec![120; 12],
            width: 64,
            height: 64,
            format: crate::vision::PixelFormat::Rgb8,
            timestamp_us: 0,
        };
        s.process_frame(&frame);
        assert_eq!(s.state(), CaptureState::Detecting);
        assert!(s.raw_signal().is_empty());
    }

    fn completion_warning(events: &[VitalsEvent]) -> Option<Option<ErrorKind>> {
        events.iter().find_map(|e| match e {
            VitalsEvent::Completion { warning, .. } => Some(*warning),
            _ => None,
        })
    }

    #[test]
    fn test_single_shot_freeze_keeps_last_window_quality() {
        let cfg = VitalsConfig {
            rng_seed: Some(1),
            progress_step: 100.0,
            ..VitalsConfig::spectral()
        };
        let mut s = session(cfg);
        s.start().unwrap();
        // one full window, then a single sample into the cleared buffer
        feed(&mut s, 0..257, FaceQuality::Excellent);
        assert_eq!(s.raw_signal().len(), 1);
        assert_eq!(s.quality_score(), 100);

        s.tick();
        assert_eq!(s.state(), CaptureState::Frozen);
        assert_eq!(s.frozen_reading().map(|r| r.quality_score), Some(100));
        assert_eq!(completion_warning(&s.drain_events()), Some(None));
    }

    #[test]
    fn test_clean_completion_has_no_warning() {
        let mut s = session(config());
        s.start().unwrap();
        feed(&mut s, 0..2, FaceQuality::Good);
        s.tick();
        s.tick();
        feed(&mut s, 2..180, FaceQuality::Good);
        assert_eq!(s.state(), CaptureState::Frozen);
        assert_eq!(completion_warning(&s.drain_events()), Some(None));
    }

    #[test]
    fn test_low_quality_completion_still_freezes_with_warning() {
        let mut s = session(config());
        s.start().unwrap();
        for i in 0..180 {
            // mean 20, std ~7 -> score ~28, below the default threshold of 50
            let p = (2.0 * PI * 1.2 * i as f32 / 30.0).sin();
            s.inject_sample(
                [150.0 + 0.5 * p, 20.0 + 10.0 * p, 100.0],
                i as i64 * FRAME_US,
                FaceQuality::Good,
            );
            if i == 0 {
                s.tick();
                s.tick();
            }
        }

        assert_eq!(s.state(), CaptureState::Frozen);
        let reading = s.frozen_reading().cloned().unwrap();
        assert!(reading.quality_score < 50, "{:?}", reading);
        assert_eq!(
            completion_warning(&s.drain_events()),
            Some(Some(ErrorKind::LowSignalQuality))
        );
    }

    #[test]
    fn test_reacquired_face_restarts_window() {
        let mut s = session(config());
        s.start().unwrap();
        feed(&mut s, 0..100, FaceQuality::Good);
        let score = s.quality_score();
        assert!(score > 0);

        feed(&mut s, 100..130, FaceQuality::None);
        assert_eq!(s.raw_signal().len(), 100);

        feed(&mut s, 130..131, FaceQuality::Excellent);
        let samples = s.raw_signal();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].timestamp_us, 130 * FRAME_US);
        assert_eq!(s.quality_score(), score);

        // a full contiguous window is needed before the next cycle
        feed(&mut s, 131..309, FaceQuality::Excellent);
        assert!(s.readings_history().is_empty());
        feed(&mut s, 309..310, FaceQuality::Excellent);
        assert_eq!(s.readings_history().len(), 1);
    }
}
