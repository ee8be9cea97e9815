//! Contracts for the external presentation collaborators.
//!
//! The calibration core never owns a widget. It emits view-model values
//! ([`DisplayUpdate`], [`Notification`]) and the application hands them to a
//! [`DisplaySurface`] and a [`DialogHost`]. Render failures come back as
//! [`DisplayError`] and are reported, never assumed away.

use std::fmt;
use std::path::PathBuf;

use crate::calibration::CalibrationProgress;
use crate::signal::Waveform;

/// What the prompt image area should show after an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageUpdate {
    /// Show the image at this path
    Show(PathBuf),
    /// Remove the current image
    Clear,
    /// Keep whatever is shown
    Unchanged,
}

/// One render command for the calibration screen
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayUpdate {
    pub instruction: String,
    pub image: ImageUpdate,
    pub progress: CalibrationProgress,
}

impl DisplayUpdate {
    /// Progress readout text, e.g. `"Progress: 2/4"`
    pub fn progress_text(&self) -> String {
        self.progress.to_string()
    }
}

/// Error returned by a display surface that failed to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayError {
    pub reason: String,
}

impl DisplayError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "display error: {}", self.reason)
    }
}

impl std::error::Error for DisplayError {}

/// Surface that accepts render commands
pub trait DisplaySurface {
    /// Update instruction text, prompt image and progress readout
    fn render(&mut self, update: &DisplayUpdate) -> Result<(), DisplayError>;

    /// Plot a captured waveform under `title`
    fn plot(&mut self, title: &str, waveform: &Waveform) -> Result<(), DisplayError>;
}

/// Dialog severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A titled message for the dialog host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Host for modal messages and yes/no confirmations
pub trait DialogHost {
    fn notify(&mut self, notification: &Notification);

    /// Ask a yes/no question; `true` means yes
    fn confirm(&mut self, title: &str, message: &str) -> bool;
}
