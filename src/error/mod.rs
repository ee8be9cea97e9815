// Error types for the EEG calibrator
//
// This module defines custom error types for credential and calibration
// operations, providing structured error handling with stable numeric codes
// that front-ends can map to user-facing notifications.

mod auth;
mod calibration;

pub use auth::{log_auth_error, AuthError, AuthErrorCodes};
pub use calibration::{log_calibration_error, CalibrationError, CalibrationErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the dialog boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
