// Progress tracking for calibration workflow
//
// This module provides the progress counter shown to observers after every
// capture ("Progress: i/N").

use std::fmt;

/// Progress through the action sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CalibrationProgress {
    /// Actions captured so far
    pub completed: usize,
    /// Actions in the sequence
    pub total: usize,
}

impl CalibrationProgress {
    /// Create a new progress instance
    ///
    /// # Arguments
    /// * `completed` - Number of captures performed
    /// * `total` - Number of actions in the sequence
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// `"i/N"`
    pub fn ratio(&self) -> String {
        format!("{}/{}", self.completed, self.total)
    }
}

impl fmt::Display for CalibrationProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Progress: {}", self.ratio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_label() {
        let progress = CalibrationProgress::new(0, 4);
        assert_eq!(progress.to_string(), "Progress: 0/4");
        assert_eq!(CalibrationProgress::new(4, 4).ratio(), "4/4");
    }
}
