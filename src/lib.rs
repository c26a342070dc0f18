// Public API exports
pub mod decode;
pub mod error;
pub mod heading;
pub mod manifest;
pub mod pipeline;
pub mod segmenter;
pub mod store;
pub mod writer;

// Re-export main types for convenience
pub use error::SplitError;

pub use decode::{DecodedText, decode, read_text, split_lines};

pub use heading::{Heading, HeadingClassifier, HeadingKind, HeadingRule, classify};

pub use segmenter::{HeadingMatch, Segment, segment, segment_with};

pub use writer::{FilenameSanitizer, write_chapter};

pub use manifest::{ChapterRecord, MANIFEST_FILE, Manifest};

pub use pipeline::{BookJob, BookOutcome, process_job, purge, resolve_jobs, split_book};

pub use store::{ReaderStore, SqliteStore, StoreError};
