/// Characters that cannot appear in a file name on common filesystems
pub const RESERVED_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Replacement for every reserved character
pub const SUBSTITUTE_CHAR: char = '·';

/// Title used when a chapter title is blank
pub const DEFAULT_TITLE: &str = "chapter";

/// Zero-padding width of the ordinal prefix
pub const INDEX_WIDTH: usize = 4;

pub struct FilenameSanitizer;

impl FilenameSanitizer {
    /// Make a chapter title safe for use in a file name.
    ///
    /// Trims whitespace and substitutes reserved characters; every other
    /// character, including CJK text, passes through unchanged.
    pub fn sanitize(title: &str) -> String {
        let title = title.trim();
        if title.is_empty() {
            return DEFAULT_TITLE.to_string();
        }

        title
            .chars()
            .map(|c| {
                if RESERVED_CHARS.contains(&c) {
                    SUBSTITUTE_CHAR
                } else {
                    c
                }
            })
            .collect()
    }

    /// `{index:04}_{sanitized_title}.txt`
    pub fn chapter_file_name(index: usize, title: &str) -> String {
        format!(
            "{:0width$}_{}.txt",
            index,
            Self::sanitize(title),
            width = INDEX_WIDTH
        )
    }
}
