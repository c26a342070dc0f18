mod splitter;


pub use splitter::{HeadingMatch, Segment, find_headings, segment, segment_with};

/// Title of the segment holding text before the first heading
pub const PREFACE_TITLE: &str = "开篇";

/// Title of the single segment emitted when no heading is found
pub const WHOLE_DOCUMENT_TITLE: &str = "全文";

/// Ordinal of the preface segment; chapters start at 1
pub const PREFACE_INDEX: usize = 0;
