//! Command queue in front of a `CaptureSession`
//!
//! Architecture:
//! - Bounded channel for backpressure; producers never block
//! - `pump()` drains commands FIFO on the caller's thread
//! - Events forwarded to an unbounded channel, completions to a `ReadingSink`
//! - Atomic counters for dropped and processed commands

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TryRecvError, TrySendError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

use super::capture::CaptureSession;
use super::events::VitalsEvent;
use super::reading::VitalsReading;
use crate::vision::Frame;

/// Receives frozen readings; persistence lives behind this trait
pub trait ReadingSink: Send {
    fn submit(&mut self, subscriber_id: Option<&str>, reading: &VitalsReading);
}

/// Commands accepted by the controller
#[derive(Debug, Clone)]
pub enum CaptureCommand {
    Start,
    Stop,
    Reset,
    /// Camera signalled a new frame; pull it from the session's source
    FrameReady,
    /// Frame pushed directly by the producer
    Frame(Frame),
    Tick,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    #[error("command queue full")]
    QueueFull,
    #[error("controller dropped")]
    Disconnected,
}

#[derive(Debug, Default)]
pub struct ControllerMetrics {
    pub commands_processed: AtomicU64,
    pub commands_dropped: AtomicU64,
    pub completions: AtomicU64,
}

impl ControllerMetrics {
    /// Read all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            commands_processed: self.commands_processed.load(Ordering::Relaxed),
            commands_dropped: self.commands_dropped.load(Ordering::Relaxed),
            completions: self.completions.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub commands_processed: u64,
    pub commands_dropped: u64,
    pub completions: u64,
}

/// Cloneable producer side, handed to the frame loop and the tick timer
#[derive(Clone)]
pub struct CaptureHandle {
    tx: Sender<CaptureCommand>,
    metrics: Arc<ControllerMetrics>,
}

impl CaptureHandle {
    /// Non-blocking enqueue; a full queue drops the command
    pub fn send(&self, cmd: CaptureCommand) -> Result<(), CommandError> {
        match self.tx.try_send(cmd) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(cmd)) => {
                self.metrics.commands_dropped.fetch_add(1, Ordering::Relaxed);
                log::warn!("command queue full; dropped {:?}", CommandName(&cmd));
                Err(CommandError::QueueFull)
            }
            Err(TrySendError::Disconnected(_)) => Err(CommandError::Disconnected),
        }
    }

    /// Enqueue `Start`
    pub fn start(&self) -> Result<(), CommandError> {
        self.send(CaptureCommand::Start)
    }

    /// Enqueue `Stop`
    pub fn stop(&self) -> Result<(), CommandError> {
        self.send(CaptureCommand::Stop)
    }

    /// Enqueue `Reset`
    pub fn reset(&self) -> Result<(), CommandError> {
        self.send(CaptureCommand::Reset)
    }

    /// Signal that the source has a frame ready
    pub fn frame_ready(&self) -> Result<(), CommandError> {
        self.send(CaptureCommand::FrameReady)
    }

    /// Enqueue a frame captured by the producer
    pub fn push_frame(&self, frame: Frame) -> Result<(), CommandError> {
        self.send(CaptureCommand::Frame(frame))
    }

    /// Enqueue a progress tick
    pub fn tick(&self) -> Result<(), CommandError> {
        self.send(CaptureCommand::Tick)
    }
}

/// Logs a command without its pixel payload
struct CommandName<'a>(&'a CaptureCommand);

impl std::fmt::Debug for CommandName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            CaptureCommand::Frame(frame) => write!(f, "Frame@{}us", frame.timestamp_us),
            other => write!(f, "{:?}", other),
        }
    }
}

pub struct CaptureController {
    session: CaptureSession,
    tx: Sender<CaptureCommand>,
    rx: Receiver<CaptureCommand>,
    events_tx: Sender<VitalsEvent>,
    events_rx: Receiver<VitalsEvent>,
    sink: Option<Box<dyn ReadingSink>>,
    metrics: Arc<ControllerMetrics>,
}

impl CaptureController {
    /// Wrap a session; the queue bound comes from `command_capacity`
    pub fn new(session: CaptureSession) -> Self {
        let (tx, rx) = bounded(session.config().command_capacity);
        let (events_tx, events_rx) = unbounded();
        Self {
            session,
            tx,
            rx,
            events_tx,
            events_rx,
            sink: None,
            metrics: Arc::new(ControllerMetrics::default()),
        }
    }

    /// Deliver frozen readings to `sink`
    pub fn with_sink(mut self, sink: Box<dyn ReadingSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// New producer handle sharing this controller's queue
    pub fn handle(&self) -> CaptureHandle {
        CaptureHandle {
            tx: self.tx.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// Receiver for the event stream; clones share one queue
    pub fn events(&self) -> Receiver<VitalsEvent> {
        self.events_rx.clone()
    }

    /// The wrapped session, for queries
    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    /// Snapshot of the command counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Process every queued command in order; returns how many ran
    pub fn pump(&mut self) -> usize {
        let mut processed = 0;
        loop {
            match self.rx.try_recv() {
                Ok(cmd) => {
                    self.dispatch(cmd);
                    self.forward_events();
                    processed += 1;
                }
                Err(TryRecvError::Empty) => break,
                // unreachable while we hold `tx`
                Err(TryRecvError::Disconnected) => break,
            }
        }
        self.metrics
            .commands_processed
            .fetch_add(processed as u64, Ordering::Relaxed);
        processed
    }

    fn dispatch(&mut self, cmd: CaptureCommand) {
        match cmd {
            CaptureCommand::Start => {
                // failure is already reported as an Error event
                if let Err(e) = self.session.start() {
                    log::debug!("start command failed: {}", e);
                }
            }
            CaptureCommand::Stop => self.session.stop(),
            CaptureCommand::Reset => self.session.reset(),
            CaptureCommand::FrameReady => {
                self.session.poll_frame();
            }
            CaptureCommand::Frame(frame) => self.session.process_frame(&frame),
            CaptureCommand::Tick => self.session.tick(),
        }
    }

    fn forward_events(&mut self) {
        for event in self.session.drain_events() {
            if let VitalsEvent::Completion {
                reading,
                subscriber_id,
                ..
            } = &event
            {
                self.metrics.completions.fetch_add(1, Ordering::Relaxed);
                if let Some(sink) = self.sink.as_mut() {
                    sink.submit(subscriber_id.as_deref(), reading);
                }
            }
            // receiver is owned by self, so the send cannot fail
            let _ = self.events_tx.send(event);
        }
    }
}
