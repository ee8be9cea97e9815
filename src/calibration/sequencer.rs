// CalibrationSequencer - timer-driven calibration workflow
//
// Drives one run through the fixed action sequence. Each action has a
// prepare phase (prompt shown, T_prepare) followed by a capture phase
// (T_capture); at the end of the capture the waveform source is read
// exactly once and the session advances.
//
// Transitions are events on a TimerQueue, so nothing here blocks or sleeps.
// The sequencer holds no rendering handles: it queues SequencerEffect values
// that the caller drains and applies to the display/dialog collaborators.

use std::time::Duration;

use log::{debug, info, warn};

use crate::calibration::action::CalibrationAction;
use crate::calibration::progress::CalibrationProgress;
use crate::calibration::session::CalibrationSession;
use crate::calibration::state::SequencerState;
use crate::config::CalibrationConfig;
use crate::display::Notification;
use crate::error::{log_calibration_error, ErrorCode};
use crate::scheduler::{TimerHandle, TimerQueue};
use crate::signal::{Waveform, WaveformSource};

/// Deferred transition scheduled on the timer queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    PrepareElapsed(CalibrationAction),
    CaptureElapsed(CalibrationAction),
}

/// Prompt image change requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptImage {
    Show(CalibrationAction),
    Clear,
    Unchanged,
}

/// Observable side effect of a transition
#[derive(Debug, Clone, PartialEq)]
pub enum SequencerEffect {
    /// Instruction label, prompt image and progress readout update
    Render {
        instruction: String,
        prompt: PromptImage,
        progress: CalibrationProgress,
    },
    /// Freshly captured waveform to plot
    Plot {
        action: CalibrationAction,
        waveform: Waveform,
    },
    /// Message for the dialog host
    Notify(Notification),
}

/// Result of a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A fresh session was created
    Started,
    /// A run is already in flight; nothing changed
    AlreadyRunning,
}

/// Calibration state machine
pub struct CalibrationSequencer {
    state: SequencerState,
    session: Option<CalibrationSession>,
    timers: TimerQueue<SequencerEvent>,
    pending: Option<TimerHandle>,
    source: Box<dyn WaveformSource>,
    prepare_delay: Duration,
    capture_delay: Duration,
    effects: Vec<SequencerEffect>,
}

impl CalibrationSequencer {
    /// Create an idle sequencer
    ///
    /// # Arguments
    /// * `config` - Prepare/capture delays
    /// * `source` - Waveform source read once per capture
    pub fn new(config: &CalibrationConfig, source: Box<dyn WaveformSource>) -> Self {
        Self {
            state: SequencerState::Idle,
            session: None,
            timers: TimerQueue::new(),
            pending: None,
            source,
            prepare_delay: config.prepare_delay(),
            capture_delay: config.capture_delay(),
            effects: Vec::new(),
        }
    }

    /// Start a calibration run
    ///
    /// From `Idle` or `Complete` this discards the previous session, creates
    /// a fresh one and enters `Preparing` for the first action. While a run
    /// is in flight the request is ignored.
    pub fn start(&mut self) -> StartOutcome {
        if self.state.is_running() {
            debug!(
                "[Sequencer] start ignored, already running in {:?}",
                self.state
            );
            return StartOutcome::AlreadyRunning;
        }

        if let Some(handle) = self.pending.take() {
            self.timers.cancel(handle);
        }
        let session = CalibrationSession::standard();
        let first = session.current_action();
        self.session = Some(session);
        info!("[Sequencer] Calibration started");

        match first {
            Some(action) => self.enter_preparing(action),
            None => self.complete(),
        }
        StartOutcome::Started
    }

    /// Move virtual time forward by `elapsed`, firing every due transition
    ///
    /// Transitions scheduled by earlier ones within the window also fire.
    ///
    /// # Returns
    /// Number of transitions fired
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let target = self.timers.now() + elapsed;
        let mut fired = 0;
        while let Some((_, event)) = self.timers.pop_due(target) {
            self.pending = None;
            self.handle(event);
            fired += 1;
        }
        self.timers.advance_clock_to(target);
        fired
    }

    /// Jump to the next pending transition and fire it
    ///
    /// # Returns
    /// `false` when nothing is pending (idle or complete)
    pub fn advance_to_next(&mut self) -> bool {
        let Some(deadline) = self.timers.next_deadline() else {
            return false;
        };
        match self.timers.pop_due(deadline) {
            Some((_, event)) => {
                self.pending = None;
                self.handle(event);
                true
            }
            None => false,
        }
    }

    /// Time until the next pending transition
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.timers.time_until_next()
    }

    /// Take every effect produced since the last drain
    pub fn drain_effects(&mut self) -> Vec<SequencerEffect> {
        std::mem::take(&mut self.effects)
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Current (or last completed) session
    pub fn session(&self) -> Option<&CalibrationSession> {
        self.session.as_ref()
    }

    /// Progress of the current session, `0/N` before the first start
    pub fn progress(&self) -> CalibrationProgress {
        self.session
            .as_ref()
            .map(CalibrationSession::progress)
            .unwrap_or_else(|| CalibrationProgress::new(0, CalibrationAction::SEQUENCE.len()))
    }

    /// Virtual time elapsed since the sequencer was created
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    fn handle(&mut self, event: SequencerEvent) {
        match (self.state, event) {
            (SequencerState::Preparing(current), SequencerEvent::PrepareElapsed(action))
                if current == action =>
            {
                self.enter_capturing(action)
            }
            (SequencerState::Capturing(current), SequencerEvent::CaptureElapsed(action))
                if current == action =>
            {
                self.capture(action)
            }
            (state, event) => {
                warn!("[Sequencer] Dropping stale {:?} in {:?}", event, state);
            }
        }
    }

    fn enter_preparing(&mut self, action: CalibrationAction) {
        debug!("[Sequencer] Preparing {}", action);
        self.state = SequencerState::Preparing(action);
        self.effects.push(SequencerEffect::Render {
            instruction: format!("Prepare for {}", action),
            prompt: PromptImage::Show(action),
            progress: self.progress(),
        });
        self.pending = Some(
            self.timers
                .schedule(self.prepare_delay, SequencerEvent::PrepareElapsed(action)),
        );
    }

    fn enter_capturing(&mut self, action: CalibrationAction) {
        debug!("[Sequencer] Capturing {}", action);
        self.state = SequencerState::Capturing(action);
        self.effects.push(SequencerEffect::Render {
            instruction: format!("Now {}", action),
            prompt: PromptImage::Unchanged,
            progress: self.progress(),
        });
        self.pending = Some(
            self.timers
                .schedule(self.capture_delay, SequencerEvent::CaptureElapsed(action)),
        );
    }

    fn capture(&mut self, action: CalibrationAction) {
        let waveform = match self.source.generate() {
            Ok(waveform) => {
                self.effects.push(SequencerEffect::Plot {
                    action,
                    waveform: waveform.clone(),
                });
                Some(waveform)
            }
            Err(err) => {
                log_calibration_error(&err, "capture");
                self.effects
                    .push(SequencerEffect::Notify(Notification::error("Error", err.message())));
                None
            }
        };

        let next = match self.session.as_mut() {
            Some(session) => {
                session.record_capture(waveform);
                session.current_action()
            }
            None => None,
        };
        info!("[Sequencer] Captured {} ({})", action, self.progress());

        match next {
            Some(next) => self.enter_preparing(next),
            None => self.complete(),
        }
    }

    fn complete(&mut self) {
        self.state = SequencerState::Complete;
        self.pending = None;
        info!("[Sequencer] Calibration complete");
        self.effects.push(SequencerEffect::Notify(Notification::info(
            "Calibration Complete",
            "Calibration is complete!",
        )));
        self.effects.push(SequencerEffect::Render {
            instruction: "Calibration Complete".to_string(),
            prompt: PromptImage::Clear,
            progress: self.progress(),
        });
    }
}
