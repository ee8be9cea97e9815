// SequencerState - phases of the calibration state machine
//
//   Idle --start--> Preparing(a0)
//   Preparing(a) --T_prepare--> Capturing(a)
//   Capturing(a) --T_capture--> Preparing(next) | Complete
//   Complete --start--> Preparing(a0)   (fresh session)

use crate::calibration::action::CalibrationAction;

/// Current phase of the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SequencerState {
    /// No calibration has been started
    Idle,
    /// Prompt shown, waiting for the prepare delay
    Preparing(CalibrationAction),
    /// User performing the action, waiting for the capture delay
    Capturing(CalibrationAction),
    /// Every action captured; terminal until the next start
    Complete,
}

impl SequencerState {
    /// True while an action is in flight
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            SequencerState::Preparing(_) | SequencerState::Capturing(_)
        )
    }
}

impl Default for SequencerState {
    fn default() -> Self {
        SequencerState::Idle
    }
}
