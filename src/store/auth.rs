use super::StoreError;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;
use uuid::Uuid;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-\.]{3,32}$").unwrap());

/// Usernames are 3-32 ASCII letters, digits, `_`, `-` or `.`
pub fn validate_username(username: &str) -> Result<(), StoreError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(StoreError::InvalidUsername(username.to_string()))
    }
}

pub fn validate_password(password: &str) -> Result<(), StoreError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(StoreError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// 16 random bytes as 32 lowercase hex characters
pub fn random_salt() -> String {
    hex::encode(Uuid::new_v4().as_bytes())
}

/// Opaque session token
pub fn new_session_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// `hex(sha256("{salt}:{password}"))`
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
