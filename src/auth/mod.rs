// Auth module - local credential store
//
// A single table of (username, password hash) rows gates entry to the
// calibration screen. Two stores share one contract:
// - SqliteCredentialStore: file-backed, one connection per call
// - InMemoryCredentialStore: HashMap-backed, for tests and throwaway runs

pub mod hash;
pub mod memory;
pub mod sqlite;

pub use hash::hash_password;
pub use memory::InMemoryCredentialStore;
pub use sqlite::SqliteCredentialStore;

use crate::error::AuthError;

/// Stored credential row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: i64,
    pub username: String,
    /// Lowercase hex SHA-256 of the password
    pub password_hash: String,
}

/// Register/authenticate contract shared by every credential store
pub trait CredentialStore {
    /// Create a credential for `username`
    ///
    /// # Errors
    /// * `AuthError::DuplicateUsername` - username already registered
    /// * `AuthError::Storage` - backend failure
    fn register(&self, username: &str, password: &str) -> Result<Credential, AuthError>;

    /// Look up the credential matching both `username` and `password`
    ///
    /// Matching is exact and case-sensitive.
    ///
    /// # Errors
    /// * `AuthError::AuthFailed` - unknown username or wrong password
    /// * `AuthError::Storage` - backend failure
    fn authenticate(&self, username: &str, password: &str) -> Result<Credential, AuthError>;
}

impl<T: CredentialStore + ?Sized> CredentialStore for Box<T> {
    fn register(&self, username: &str, password: &str) -> Result<Credential, AuthError> {
        (**self).register(username, password)
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<Credential, AuthError> {
        (**self).authenticate(username, password)
    }
}
