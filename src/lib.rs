// EEG Calibrator Core
// Login-gated calibration session over a synthetic EEG source

// Module declarations
pub mod app;
pub mod assets;
pub mod auth;
pub mod calibration;
pub mod config;
pub mod display;
pub mod electrode;
pub mod error;
pub mod export;
pub mod scheduler;
pub mod signal;

// Re-exports for convenience
pub use app::{CalibrationApp, SaveOutcome, Screen};
pub use auth::{Credential, CredentialStore, InMemoryCredentialStore, SqliteCredentialStore};
pub use calibration::{CalibrationAction, CalibrationSequencer, SequencerState};
pub use config::AppConfig;
pub use display::{DialogHost, DisplaySurface, DisplayUpdate, Notification, Severity};
pub use error::{AuthError, CalibrationError, ErrorCode};
