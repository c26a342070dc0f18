use super::auth::{
    hash_password, new_session_token, random_salt, validate_password, validate_username,
};
use super::{ReaderStore, StoreError};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Lifetime of a session token
pub const SESSION_TTL_DAYS: i64 = 30;

/// SQLite-backed [`ReaderStore`]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new in-memory store
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open (or create) a store file, creating its parent directory
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
            CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                pass_hash TEXT NOT NULL,
                salt TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                username TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                expires_at INTEGER NOT NULL,
                FOREIGN KEY (username) REFERENCES users(username)
            );

            CREATE TABLE IF NOT EXISTS progress (
                username TEXT NOT NULL,
                book TEXT NOT NULL,
                idx INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (username, book)
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_username ON sessions(username);
            "#,
            )
            .context("Failed to initialize database schema")?;
        Ok(())
    }

    fn user_exists(&self, username: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM users WHERE username = ?1",
                params![username],
                |_| Ok(()),
            )
            .optional()
            .with_context(|| format!("Failed to look up user: {}", username))?;
        Ok(found.is_some())
    }

    /// Start a session as of `now`
    pub fn create_session_at(&self, username: &str, now: DateTime<Utc>) -> Result<String> {
        if !self.user_exists(username)? {
            return Err(StoreError::UnknownUser(username.to_string()).into());
        }
        self.purge_expired_sessions(now)?;

        let token = new_session_token();
        let expires_at = now + Duration::days(SESSION_TTL_DAYS);
        self.conn
            .execute(
                "INSERT INTO sessions (token, username, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
                params![token, username, now.timestamp(), expires_at.timestamp()],
            )
            .with_context(|| format!("Failed to create session for {}", username))?;

        debug!(username, "session created");
        Ok(token)
    }

    /// Resolve a session as of `now`
    pub fn resolve_session_at(&self, token: &str, now: DateTime<Utc>) -> Result<Option<String>> {
        let username = self
            .conn
            .query_row(
                "SELECT username FROM sessions WHERE token = ?1 AND expires_at > ?2",
                params![token, now.timestamp()],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .context("Failed to query session")?;
        Ok(username)
    }

    /// Drop sessions that expired before `now`; returns how many were removed
    pub fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<usize> {
        let removed = self
            .conn
            .execute(
                "DELETE FROM sessions WHERE expires_at <= ?1",
                params![now.timestamp()],
            )
            .context("Failed to purge expired sessions")?;
        Ok(removed)
    }

    fn upsert_progress(
        conn: &Connection,
        username: &str,
        book: &str,
        index: i64,
        updated_at: i64,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO progress (username, book, idx, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(username, book) DO UPDATE SET idx = excluded.idx, updated_at = excluded.updated_at",
            params![username, book, index, updated_at],
        )
        .with_context(|| format!("Failed to save progress for {} / {}", username, book))?;
        Ok(())
    }
}

impl ReaderStore for SqliteStore {
    fn create_user(&self, username: &str, password: &str) -> Result<()> {
        validate_username(username)?;
        validate_password(password)?;
        if self.user_exists(username)? {
            return Err(StoreError::UserExists(username.to_string()).into());
        }

        let salt = random_salt();
        let pass_hash = hash_password(&salt, password);
        self.conn
            .execute(
                "INSERT INTO users (username, pass_hash, salt, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![username, pass_hash, salt, Utc::now().timestamp()],
            )
            .with_context(|| format!("Failed to insert user: {}", username))?;

        debug!(username, "user created");
        Ok(())
    }

    fn verify_user(&self, username: &str, password: &str) -> Result<bool> {
        let row = self
            .conn
            .query_row(
                "SELECT pass_hash, salt FROM users WHERE username = ?1",
                params![username],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()
            .with_context(|| format!("Failed to look up user: {}", username))?;

        Ok(match row {
            Some((expected, salt)) => hash_password(&salt, password) == expected,
            None => false,
        })
    }

    fn create_session(&self, username: &str) -> Result<String> {
        self.create_session_at(username, Utc::now())
    }

    fn delete_session(&self, token: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM sessions WHERE token = ?1", params![token])
            .context("Failed to delete session")?;
        Ok(())
    }

    fn resolve_session(&self, token: &str) -> Result<Option<String>> {
        self.resolve_session_at(token, Utc::now())
    }

    fn get_progress(&self, username: &str) -> Result<BTreeMap<String, i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT book, idx FROM progress WHERE username = ?1")
            .context("Failed to prepare statement")?;

        let items = stmt
            .query_map(params![username], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })
            .context("Failed to query progress")?
            .collect::<Result<BTreeMap<_, _>, _>>()
            .context("Failed to collect progress")?;

        Ok(items)
    }

    fn set_progress(&self, username: &str, book: &str, index: i64) -> Result<()> {
        if username.trim().is_empty() {
            return Err(StoreError::MissingField("username").into());
        }
        if book.trim().is_empty() {
            return Err(StoreError::MissingField("book").into());
        }

        Self::upsert_progress(&self.conn, username, book, index, Utc::now().timestamp())
    }

    fn set_progress_batch(&self, username: &str, items: &BTreeMap<String, i64>) -> Result<()> {
        if username.trim().is_empty() {
            return Err(StoreError::MissingField("username").into());
        }

        let now = Utc::now().timestamp();
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to begin transaction")?;
        for (book, index) in items {
            if book.trim().is_empty() {
                continue;
            }
            Self::upsert_progress(&tx, username, book, *index, now)?;
        }
        tx.commit().context("Failed to commit progress batch")?;
        Ok(())
    }
}
