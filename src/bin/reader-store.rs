use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use novel_shelf::{ReaderStore, SqliteStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reader-store", about = "Manage reader accounts, sessions and progress")]
struct Cli {
    /// SQLite database file
    #[arg(long, default_value = "data/progress.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Session tokens
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Last-read chapter per book
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a new user
    Add { username: String, password: String },
    /// Check a username/password pair
    Verify { username: String, password: String },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Log in and print a new session token
    Create { username: String, password: String },
    /// Print the user behind a token
    Resolve { token: String },
    /// Log out
    Delete { token: String },
    /// Remove every expired session
    Purge,
}

#[derive(Subcommand)]
enum ProgressAction {
    /// Print every book's chapter index as JSON
    Get { username: String },
    /// Save the chapter index of one book
    Set {
        username: String,
        book: String,
        index: i64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = SqliteStore::open(&cli.db)
        .with_context(|| format!("Failed to open store {}", cli.db.display()))?;

    match cli.command {
        Commands::User { action } => match action {
            UserAction::Add { username, password } => {
                store.create_user(username.trim(), &password)?;
                println!("Created user {}", username.trim());
            }
            UserAction::Verify { username, password } => {
                if !store.verify_user(username.trim(), &password)? {
                    bail!("invalid credentials");
                }
                println!("OK");
            }
        },
        Commands::Session { action } => match action {
            SessionAction::Create { username, password } => {
                let username = username.trim();
                if !store.verify_user(username, &password)? {
                    bail!("invalid credentials");
                }
                println!("{}", store.create_session(username)?);
            }
            SessionAction::Resolve { token } => match store.resolve_session(&token)? {
                Some(username) => println!("{}", username),
                None => bail!("no live session for token"),
            },
            SessionAction::Delete { token } => {
                store.delete_session(&token)?;
                println!("OK");
            }
            SessionAction::Purge => {
                let removed = store.purge_expired_sessions(Utc::now())?;
                println!("Removed {} expired sessions", removed);
            }
        },
        Commands::Progress { action } => match action {
            ProgressAction::Get { username } => {
                let items = store.get_progress(username.trim())?;
                let json = serde_json::json!({ "username": username.trim(), "items": items });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            ProgressAction::Set {
                username,
                book,
                index,
            } => {
                store.set_progress(username.trim(), book.trim(), index)?;
                println!("OK");
            }
        },
    }

    Ok(())
}
