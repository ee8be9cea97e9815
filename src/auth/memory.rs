// InMemoryCredentialStore - HashMap-backed store with the same contract

use std::collections::HashMap;
use std::sync::Mutex;

use log::info;

use crate::auth::{hash_password, Credential, CredentialStore};
use crate::error::AuthError;

/// Credential store that lives only as long as the process
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: Mutex<HashMap<String, Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Credential>>, AuthError> {
        self.users.lock().map_err(|_| AuthError::Storage {
            reason: "credential map lock poisoned".to_string(),
        })
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn register(&self, username: &str, password: &str) -> Result<Credential, AuthError> {
        info!("[Auth] Attempting to register user: {}", username);
        let mut users = self.lock()?;
        if users.contains_key(username) {
            return Err(AuthError::DuplicateUsername {
                username: username.to_string(),
            });
        }

        let credential = Credential {
            id: users.len() as i64 + 1,
            username: username.to_string(),
            password_hash: hash_password(password),
        };
        users.insert(username.to_string(), credential.clone());
        Ok(credential)
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<Credential, AuthError> {
        info!("[Auth] Attempting to login user: {}", username);
        let users = self.lock()?;
        let password_hash = hash_password(password);
        users
            .get(username)
            .filter(|credential| credential.password_hash == password_hash)
            .cloned()
            .ok_or(AuthError::AuthFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_authenticate() {
        let store = InMemoryCredentialStore::new();
        assert!(store.is_empty());

        let created = store.register("alice", "pw").unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.authenticate("alice", "pw").unwrap(), created);
    }

    #[test]
    fn test_duplicate_regardless_of_password() {
        let store = InMemoryCredentialStore::new();
        store.register("alice", "pw").unwrap();

        for password in ["pw", "other", ""] {
            assert!(matches!(
                store.register("alice", password),
                Err(AuthError::DuplicateUsername { .. })
            ));
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_auth_failed_variants() {
        let store = InMemoryCredentialStore::new();
        store.register("alice", "pw").unwrap();

        assert_eq!(store.authenticate("bob", "pw"), Err(AuthError::AuthFailed));
        assert_eq!(store.authenticate("alice", "PW"), Err(AuthError::AuthFailed));
        assert_eq!(store.authenticate("Alice", "pw"), Err(AuthError::AuthFailed));
    }
}
