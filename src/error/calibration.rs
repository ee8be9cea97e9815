// Calibration error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Calibration error code constants
///
/// These constants are the single source of truth for the codes shown in
/// error dialogs and CLI output.
///
/// Error code range: 2001-2005
pub struct CalibrationErrorCodes {}

impl CalibrationErrorCodes {
    /// A prompt image or icon could not be loaded
    pub const ASSET_LOAD_FAILED: i32 = 2001;

    /// Export destination could not be opened or written
    pub const IO: i32 = 2002;

    /// Waveform source failed to produce a sample
    pub const GENERATION_FAILED: i32 = 2003;

    /// Display surface rejected a render command
    pub const RENDER_FAILED: i32 = 2004;

    /// No calibration session exists yet
    pub const NO_SESSION: i32 = 2005;
}

/// Log a calibration error with structured context
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_calibration_error(err: &CalibrationError, context: &str) {
    error!(
        "Calibration error in {}: code={}, component=CalibrationSequencer, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Calibration-related errors
///
/// None of these abort a running calibration. Asset, render and generation
/// failures are reported and skipped; export failures keep the session so
/// the user can save again.
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Prompt image or icon missing/unreadable
    AssetLoadFailed { asset: String, reason: String },

    /// Export destination could not be opened or written
    Io { path: String, reason: String },

    /// Waveform source failed
    GenerationFailed { reason: String },

    /// Display surface failed to render
    RenderFailed { reason: String },

    /// Nothing to export yet
    NoSession,
}

impl ErrorCode for CalibrationError {
    fn code(&self) -> i32 {
        match self {
            CalibrationError::AssetLoadFailed { .. } => CalibrationErrorCodes::ASSET_LOAD_FAILED,
            CalibrationError::Io { .. } => CalibrationErrorCodes::IO,
            CalibrationError::GenerationFailed { .. } => CalibrationErrorCodes::GENERATION_FAILED,
            CalibrationError::RenderFailed { .. } => CalibrationErrorCodes::RENDER_FAILED,
            CalibrationError::NoSession => CalibrationErrorCodes::NO_SESSION,
        }
    }

    fn message(&self) -> String {
        match self {
            CalibrationError::AssetLoadFailed { asset, reason } => {
                format!("Failed to load {}: {}", asset, reason)
            }
            CalibrationError::Io { path, reason } => {
                format!("Failed to save data to {}: {}", path, reason)
            }
            CalibrationError::GenerationFailed { reason } => {
                format!("Failed to capture EEG data: {}", reason)
            }
            CalibrationError::RenderFailed { reason } => {
                format!("Failed to update display: {}", reason)
            }
            CalibrationError::NoSession => "No calibration data to save".to_string(),
        }
    }
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CalibrationError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for CalibrationError {}
