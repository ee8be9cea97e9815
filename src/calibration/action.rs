// Calibration actions - the fixed gesture sequence
//
// A run always visits LeftClick → RightClick → ScrollUp → ScrollDown.

/// Gesture the user performs during one calibration step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CalibrationAction {
    /// Step 1: left mouse click
    LeftClick,
    /// Step 2: right mouse click
    RightClick,
    /// Step 3: scroll wheel up
    ScrollUp,
    /// Step 4: scroll wheel down
    ScrollDown,
}

impl CalibrationAction {
    /// Every action in calibration order
    pub const SEQUENCE: [CalibrationAction; 4] = [
        CalibrationAction::LeftClick,
        CalibrationAction::RightClick,
        CalibrationAction::ScrollUp,
        CalibrationAction::ScrollDown,
    ];

    /// Get human-readable name for display and export headers
    pub fn display_name(&self) -> &'static str {
        match self {
            CalibrationAction::LeftClick => "Left Click",
            CalibrationAction::RightClick => "Right Click",
            CalibrationAction::ScrollUp => "Scroll Up",
            CalibrationAction::ScrollDown => "Scroll Down",
        }
    }

    /// File name of the prompt image shown while preparing this action
    pub fn image_file(&self) -> &'static str {
        match self {
            CalibrationAction::LeftClick => "left_click.png",
            CalibrationAction::RightClick => "right_click.png",
            CalibrationAction::ScrollUp => "scroll_up.png",
            CalibrationAction::ScrollDown => "scroll_down.png",
        }
    }
}

impl std::fmt::Display for CalibrationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_order() {
        assert_eq!(
            CalibrationAction::SEQUENCE,
            [
                CalibrationAction::LeftClick,
                CalibrationAction::RightClick,
                CalibrationAction::ScrollUp,
                CalibrationAction::ScrollDown,
            ]
        );
    }

    #[test]
    fn test_calibration_action_display_name() {
        assert_eq!(CalibrationAction::LeftClick.display_name(), "Left Click");
        assert_eq!(CalibrationAction::RightClick.display_name(), "Right Click");
        assert_eq!(CalibrationAction::ScrollUp.display_name(), "Scroll Up");
        assert_eq!(CalibrationAction::ScrollDown.display_name(), "Scroll Down");
        assert_eq!(format!("{}", CalibrationAction::ScrollUp), "Scroll Up");
    }

    #[test]
    fn test_calibration_action_image_file() {
        assert_eq!(CalibrationAction::LeftClick.image_file(), "left_click.png");
        assert_eq!(CalibrationAction::ScrollDown.image_file(), "scroll_down.png");
    }
}
