use crate::decode::{read_text, split_lines};
use crate::error::SplitError;
use crate::manifest::{MANIFEST_FILE, Manifest};
use crate::segmenter::segment;
use crate::writer::write_chapter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Books processed when no override is given: (source, encoding, output directory)
pub const DEFAULT_BOOKS: [(&str, &str, &str); 2] = [
    ("1.txt", "gb2312", "凡人修仙传"),
    ("2.txt", "utf-8", "凡人修仙传·仙界篇"),
];

/// One (source, encoding, output directory) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookJob {
    pub src: PathBuf,
    pub encoding: String,
    pub out_dir: PathBuf,
}

impl BookJob {
    pub fn new(
        src: impl Into<PathBuf>,
        encoding: impl Into<String>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            src: src.into(),
            encoding: encoding.into(),
            out_dir: out_dir.into(),
        }
    }
}

/// What happened to one book in a batch
#[derive(Debug)]
pub enum BookOutcome {
    Written(Manifest),
    SourceMissing,
    Failed(SplitError),
}

pub fn default_jobs() -> Vec<BookJob> {
    DEFAULT_BOOKS
        .iter()
        .map(|(src, encoding, out_dir)| BookJob::new(*src, *encoding, *out_dir))
        .collect()
}

/// Read a JSON array of `{src, encoding, out_dir}` objects
pub fn load_jobs(path: &Path) -> Result<Vec<BookJob>, SplitError> {
    let contents = fs::read_to_string(path).map_err(|e| SplitError::io(path, e))?;
    let jobs: Vec<BookJob> = serde_json::from_str(&contents)?;
    if jobs.is_empty() {
        return Err(SplitError::InvalidBookList(format!(
            "{} lists no books",
            path.display()
        )));
    }
    Ok(jobs)
}

/// Pick the books to process: a positional triple wins, then a books file,
/// then the built-in list
pub fn resolve_jobs(
    positional: &[String],
    books_file: Option<&Path>,
) -> Result<Vec<BookJob>, SplitError> {
    match positional {
        [src, encoding, out_dir] => Ok(vec![BookJob::new(src, encoding, out_dir)]),
        [] => match books_file {
            Some(path) => load_jobs(path),
            None => Ok(default_jobs()),
        },
        other => Err(SplitError::InvalidBookList(format!(
            "expected SRC ENCODING OUT_DIR, got {} argument(s)",
            other.len()
        ))),
    }
}

/// Split one source file into chapter files plus a manifest in `out_dir`
pub fn split_book(src: &Path, encoding: &str, out_dir: &Path) -> Result<Manifest, SplitError> {
    fs::create_dir_all(out_dir).map_err(|e| SplitError::io(out_dir, e))?;

    let decoded = read_text(src, encoding)?;
    if decoded.lossy {
        warn!(src = %src.display(), "source contains undecodable bytes");
    }
    let lines = split_lines(&decoded.text);
    let segments = segment(&lines);
    debug!(
        src = %src.display(),
        lines = lines.len(),
        segments = segments.len(),
        encoding = %decoded.encoding,
        "segmented source"
    );

    let mut records = Vec::with_capacity(segments.len());
    for seg in &segments {
        records.push(write_chapter(seg.index, &seg.title, &seg.body, out_dir)?);
    }

    let manifest = Manifest::new(
        out_dir.to_string_lossy(),
        src.to_string_lossy(),
        encoding,
        records,
    );
    manifest.write_to_dir(out_dir)?;

    info!(
        book = %manifest.book,
        chapters = manifest.chapter_count(),
        "book split"
    );
    Ok(manifest)
}

/// Delete `*.txt` files and the manifest directly inside `out_dir`.
///
/// Best-effort: a missing directory or an undeletable file is skipped.
/// Returns the number of files removed.
pub fn purge(out_dir: &Path) -> usize {
    let mut removed = 0;

    for entry in WalkDir::new(out_dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(dir = %out_dir.display(), error = %e, "purge skipped entry");
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy();
        if !(name.ends_with(".txt") || name == MANIFEST_FILE) {
            continue;
        }

        match fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(e) => debug!(
                path = %entry.path().display(),
                error = %e,
                "purge could not remove file"
            ),
        }
    }

    debug!(dir = %out_dir.display(), removed, "purged previous output");
    removed
}

/// Run one job: skip a missing source, optionally purge, then split.
///
/// A failure only affects this job; the caller decides whether to go on.
pub fn process_job(job: &BookJob, clean: bool) -> BookOutcome {
    if !job.src.exists() {
        return BookOutcome::SourceMissing;
    }
    if clean {
        purge(&job.out_dir);
    }

    match split_book(&job.src, &job.encoding, &job.out_dir) {
        Ok(manifest) => BookOutcome::Written(manifest),
        Err(e) => BookOutcome::Failed(e),
    }
}
