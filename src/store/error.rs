use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password too short: at least {min} characters required")]
    PasswordTooShort { min: usize },

    #[error("Username already exists: {0}")]
    UserExists(String),

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),
}
