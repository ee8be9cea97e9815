// Calibration module - action sequencing and captured data
//
// This module provides the pieces of a calibration run:
// 1. CalibrationAction: the fixed gesture sequence
// 2. CalibrationSession: waveforms captured per action
// 3. CalibrationSequencer: the timer-driven state machine
//
// The calibration workflow:
// 1. start() creates a fresh session and prompts the first action
// 2. Each action is prepared (3s) then captured (5s), one waveform each
// 3. After the fourth capture the sequencer is Complete and the session
//    can be exported

pub mod action;
pub mod progress;
pub mod sequencer;
pub mod session;
pub mod state;

pub use action::CalibrationAction;
pub use progress::CalibrationProgress;
pub use sequencer::{
    CalibrationSequencer, PromptImage, SequencerEffect, SequencerEvent, StartOutcome,
};
pub use session::CalibrationSession;
pub use state::SequencerState;
