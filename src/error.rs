use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("I/O failure at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode or decode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Invalid book list: {0}")]
    InvalidBookList(String),
}

impl SplitError {
    /// Attach the offending path to an I/O error
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        SplitError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
