// SqliteCredentialStore - file-backed credential table
//
// Every call opens its own connection, runs one statement (inside a
// transaction for writes) and drops the connection. Nothing is held between
// calls, so there is no pool and no cross-call transaction.

use std::path::{Path, PathBuf};

use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};

use crate::auth::{hash_password, Credential, CredentialStore};
use crate::error::{log_auth_error, AuthError};

const CREATE_USERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )";

/// Credential store persisted in a single SQLite file
#[derive(Debug, Clone)]
pub struct SqliteCredentialStore {
    path: PathBuf,
}

impl SqliteCredentialStore {
    /// Open (creating if needed) the credential file at `path`
    ///
    /// Table creation is idempotent, so this is safe on every startup.
    ///
    /// # Errors
    /// `AuthError::Storage` if the file cannot be opened or the schema
    /// cannot be created
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AuthError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        let conn = store.connect()?;
        conn.execute(CREATE_USERS_TABLE, [])
            .inspect_err(|_| debug!("[Auth] schema setup failed for {:?}", store.path))?;
        info!("[Auth] Credential store ready at {:?}", store.path);
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, AuthError> {
        Ok(Connection::open(&self.path)?)
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl CredentialStore for SqliteCredentialStore {
    fn register(&self, username: &str, password: &str) -> Result<Credential, AuthError> {
        info!("[Auth] Attempting to register user: {}", username);
        let password_hash = hash_password(password);

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        match tx.execute(
            "INSERT INTO users (username, password) VALUES (?1, ?2)",
            params![username, password_hash],
        ) {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                let err = AuthError::DuplicateUsername {
                    username: username.to_string(),
                };
                log_auth_error(&err, "register");
                return Err(err);
            }
            Err(err) => return Err(err.into()),
        }
        let id = tx.last_insert_rowid();
        tx.commit()?;

        info!("[Auth] User registered successfully");
        Ok(Credential {
            id,
            username: username.to_string(),
            password_hash,
        })
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<Credential, AuthError> {
        info!("[Auth] Attempting to login user: {}", username);
        let password_hash = hash_password(password);

        let conn = self.connect()?;
        let credential = conn
            .query_row(
                "SELECT id, username, password FROM users WHERE username = ?1 AND password = ?2",
                params![username, password_hash],
                |row| {
                    Ok(Credential {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password_hash: row.get(2)?,
                    })
                },
            )
            .optional()?;

        match credential {
            Some(credential) => {
                info!("[Auth] Login successful");
                Ok(credential)
            }
            None => {
                info!("[Auth] Login failed");
                Err(AuthError::AuthFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, SqliteCredentialStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteCredentialStore::open(dir.path().join("users.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_is_idempotent() {
        let (dir, store) = temp_store();
        store.register("alice", "pw").unwrap();

        let reopened = SqliteCredentialStore::open(dir.path().join("users.db")).unwrap();
        assert!(reopened.authenticate("alice", "pw").is_ok());
    }

    #[test]
    fn test_register_then_authenticate() {
        let (_dir, store) = temp_store();
        let created = store.register("alice", "s3cret").unwrap();
        assert_eq!(created.username, "alice");
        assert_eq!(created.password_hash, hash_password("s3cret"));

        let found = store.authenticate("alice", "s3cret").unwrap();
        assert_eq!(found, created);
    }

    #[test]
    fn test_duplicate_username() {
        let (_dir, store) = temp_store();
        store.register("bob", "one").unwrap();

        let err = store.register("bob", "two").unwrap_err();
        assert_eq!(
            err,
            AuthError::DuplicateUsername {
                username: "bob".to_string()
            }
        );
        // The original password still works
        assert!(store.authenticate("bob", "one").is_ok());
        assert_eq!(
            store.authenticate("bob", "two").unwrap_err(),
            AuthError::AuthFailed
        );
    }

    #[test]
    fn test_unknown_user_and_wrong_password_are_indistinguishable() {
        let (_dir, store) = temp_store();
        store.register("carol", "right").unwrap();

        let unknown = store.authenticate("dave", "right").unwrap_err();
        let wrong = store.authenticate("carol", "wrong").unwrap_err();
        assert_eq!(unknown, wrong);
    }

    #[test]
    fn test_authenticate_is_case_sensitive() {
        let (_dir, store) = temp_store();
        store.register("Erin", "Pass").unwrap();

        assert!(store.authenticate("erin", "Pass").is_err());
        assert!(store.authenticate("Erin", "pass").is_err());
        assert!(store.authenticate("Erin", "Pass").is_ok());
    }

    #[test]
    fn test_password_not_stored_in_plaintext() {
        let (_dir, store) = temp_store();
        store.register("frank", "hunter2").unwrap();

        let conn = Connection::open(store.path()).unwrap();
        let stored: String = conn
            .query_row(
                "SELECT password FROM users WHERE username = 'frank'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_ne!(stored, "hunter2");
        assert_eq!(stored, hash_password("hunter2"));
    }

    #[test]
    fn test_ids_autoincrement() {
        let (_dir, store) = temp_store();
        let a = store.register("a", "x").unwrap();
        let b = store.register("b", "x").unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn test_open_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = SqliteCredentialStore::open(dir.path().join("nope").join("users.db"));
        assert!(matches!(result, Err(AuthError::Storage { .. })));
    }
}
