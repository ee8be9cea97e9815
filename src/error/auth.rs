// Credential store error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Credential error code constants
///
/// Error code range: 3001-3003
pub struct AuthErrorCodes {}

impl AuthErrorCodes {
    /// Username is already registered
    pub const DUPLICATE_USERNAME: i32 = 3001;

    /// Username/password pair did not match a stored credential
    pub const AUTH_FAILED: i32 = 3002;

    /// Underlying credential storage failed
    pub const STORAGE: i32 = 3003;
}

/// Log a credential error with structured context
///
/// The username is never part of the logged message for `AuthFailed`, so a
/// failed login does not reveal whether the account exists.
pub fn log_auth_error(err: &AuthError, context: &str) {
    error!(
        "Auth error in {}: code={}, component=CredentialStore, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Credential-related errors
///
/// Integrity violations are converted into `DuplicateUsername` at the store
/// boundary instead of surfacing as storage failures.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// Username already exists (UNIQUE constraint violated)
    DuplicateUsername { username: String },

    /// Unknown username or wrong password; the two are indistinguishable
    AuthFailed,

    /// Storage backend failed (file unreadable, schema broken, lock poisoned)
    Storage { reason: String },
}

impl ErrorCode for AuthError {
    fn code(&self) -> i32 {
        match self {
            AuthError::DuplicateUsername { .. } => AuthErrorCodes::DUPLICATE_USERNAME,
            AuthError::AuthFailed => AuthErrorCodes::AUTH_FAILED,
            AuthError::Storage { .. } => AuthErrorCodes::STORAGE,
        }
    }

    fn message(&self) -> String {
        match self {
            AuthError::DuplicateUsername { username } => {
                format!("Username already exists: {}", username)
            }
            AuthError::AuthFailed => "Invalid username or password".to_string(),
            AuthError::Storage { reason } => format!("Credential storage failed: {}", reason),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AuthError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for AuthError {}

impl From<rusqlite::Error> for AuthError {
    fn from(err: rusqlite::Error) -> Self {
        AuthError::Storage {
            reason: err.to_string(),
        }
    }
}
