pub mod auth;
mod error;
mod sqlite;


pub use error::StoreError;
pub use sqlite::{SESSION_TTL_DAYS, SqliteStore};

use anyhow::Result;
use std::collections::BTreeMap;

/// Per-reader state kept by the reading site: accounts, sessions and the
/// last-read chapter index of every book
pub trait ReaderStore {
    /// Register a new account
    fn create_user(&self, username: &str, password: &str) -> Result<()>;

    /// Check a password; unknown users simply fail verification
    fn verify_user(&self, username: &str, password: &str) -> Result<bool>;

    /// Start a session for an existing user and return its token
    fn create_session(&self, username: &str) -> Result<String>;

    /// End a session; unknown tokens are ignored
    fn delete_session(&self, token: &str) -> Result<()>;

    /// Username behind a live session, `None` if unknown or expired
    fn resolve_session(&self, token: &str) -> Result<Option<String>>;

    /// Last-read chapter index per book
    fn get_progress(&self, username: &str) -> Result<BTreeMap<String, i64>>;

    /// Record the last-read chapter index of one book
    fn set_progress(&self, username: &str, book: &str, index: i64) -> Result<()>;

    /// Record several books at once, skipping entries without a book name
    fn set_progress_batch(&self, username: &str, items: &BTreeMap<String, i64>) -> Result<()>;
}
