mod sanitize;


pub use sanitize::{DEFAULT_TITLE, FilenameSanitizer, INDEX_WIDTH, RESERVED_CHARS, SUBSTITUTE_CHAR};

use crate::error::SplitError;
use crate::manifest::ChapterRecord;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Join body lines with `\n` and strip leading/trailing newlines
pub fn render_body<S: AsRef<str>>(body_lines: &[S]) -> String {
    let joined = body_lines
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    joined.trim_matches('\n').to_string()
}

/// Write one chapter file into `out_dir` and describe it.
///
/// The directory is created if needed. Content is UTF-8 without a BOM,
/// with `\n` line endings on every platform.
pub fn write_chapter<S: AsRef<str>>(
    index: usize,
    title: &str,
    body_lines: &[S],
    out_dir: &Path,
) -> Result<ChapterRecord, SplitError> {
    fs::create_dir_all(out_dir).map_err(|e| SplitError::io(out_dir, e))?;

    let file = FilenameSanitizer::chapter_file_name(index, title);
    let path = out_dir.join(&file);
    let content = render_body(body_lines);
    fs::write(&path, content.as_bytes()).map_err(|e| SplitError::io(&path, e))?;

    debug!(index, file = %file, bytes = content.len(), "chapter written");

    Ok(ChapterRecord {
        index,
        title: title.to_string(),
        file,
    })
}
