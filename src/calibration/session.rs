// CalibrationSession - in-memory record of one calibration run
//
// Created on every start, mutated only by the sequencer on capture, and kept
// after completion until the next start so it can be exported (again, after
// a failed save).

use std::collections::HashMap;

use crate::calibration::action::CalibrationAction;
use crate::calibration::progress::CalibrationProgress;
use crate::signal::Waveform;

/// Captured data for one run
#[derive(Debug, Clone)]
pub struct CalibrationSession {
    sequence: Vec<CalibrationAction>,
    current_index: usize,
    captured: HashMap<CalibrationAction, Vec<Waveform>>,
}

impl CalibrationSession {
    /// Create a session over the given action order
    ///
    /// Every action starts with an empty capture list so export emits a
    /// header row for it even before (or without) a capture.
    pub fn new(sequence: Vec<CalibrationAction>) -> Self {
        let captured = sequence.iter().map(|action| (*action, Vec::new())).collect();
        Self {
            sequence,
            current_index: 0,
            captured,
        }
    }

    /// Session over the fixed four-action sequence
    pub fn standard() -> Self {
        Self::new(CalibrationAction::SEQUENCE.to_vec())
    }

    pub fn sequence(&self) -> &[CalibrationAction] {
        &self.sequence
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Action awaiting capture, `None` once every action was visited
    pub fn current_action(&self) -> Option<CalibrationAction> {
        self.sequence.get(self.current_index).copied()
    }

    /// Waveforms captured for `action`, in capture order
    pub fn captured(&self, action: CalibrationAction) -> &[Waveform] {
        self.captured
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate `(action, waveforms)` in sequence order
    pub fn blocks(&self) -> impl Iterator<Item = (CalibrationAction, &[Waveform])> + '_ {
        self.sequence
            .iter()
            .map(move |action| (*action, self.captured(*action)))
    }

    /// Total number of waveforms across all actions
    pub fn waveform_count(&self) -> usize {
        self.captured.values().map(Vec::len).sum()
    }

    pub fn progress(&self) -> CalibrationProgress {
        CalibrationProgress::new(self.current_index, self.sequence.len())
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.sequence.len()
    }

    /// Record the outcome of the current action and move to the next one
    ///
    /// `waveform` is `None` when the source failed; the action is still
    /// consumed so the run keeps going.
    ///
    /// # Returns
    /// The action that was consumed, or `None` if the session was complete
    pub(crate) fn record_capture(&mut self, waveform: Option<Waveform>) -> Option<CalibrationAction> {
        let action = self.current_action()?;
        if let Some(waveform) = waveform {
            self.captured.entry(action).or_default().push(waveform);
        }
        self.current_index += 1;
        Some(action)
    }
}
