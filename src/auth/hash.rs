// Password hashing

use sha2::{Digest, Sha256};

/// SHA-256 of the UTF-8 password as 64 lowercase hex characters
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
