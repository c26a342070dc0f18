use super::{PREFACE_INDEX, PREFACE_TITLE, WHOLE_DOCUMENT_TITLE};
use crate::heading::{HeadingClassifier, HeadingKind, default_classifier};

/// A line recognized as a heading, with its position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    pub title: String,
    /// 0-based line index in the normalized document
    pub line_index: usize,
    pub kind: HeadingKind,
}

/// A contiguous run of source lines destined for one chapter file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 0 for the preface, 1..N for chapters in discovery order
    pub index: usize,
    pub title: String,
    /// First source line (inclusive)
    pub start_line: usize,
    /// Last source line (exclusive)
    pub end_line: usize,
    /// Lines to write, including a synthetic title header when one was added
    pub body: Vec<String>,
    /// Whether `body` starts with an injected `[title, ""]` header
    pub synthetic_header: bool,
}

impl Segment {
    /// The source lines this segment covers, without any injected header
    pub fn source_lines(&self) -> &[String] {
        if self.synthetic_header {
            &self.body[2..]
        } else {
            &self.body
        }
    }

    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line
    }
}

/// Scan every line and record where headings occur
pub fn find_headings<S: AsRef<str>>(
    classifier: &HeadingClassifier,
    lines: &[S],
) -> Vec<HeadingMatch> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(line_index, line)| {
            classifier
                .classify_heading(line.as_ref())
                .map(|heading| HeadingMatch {
                    title: heading.title,
                    line_index,
                    kind: heading.kind,
                })
        })
        .collect()
}

/// Partition lines into preface and chapter segments using the default rules
pub fn segment<S: AsRef<str>>(lines: &[S]) -> Vec<Segment> {
    segment_with(default_classifier(), lines)
}

/// Partition lines into ordered segments:
/// - no heading anywhere: one whole-document segment at index 1
/// - non-blank text before the first heading: a preface at index 0
/// - one chapter per heading, running up to the next heading
pub fn segment_with<S: AsRef<str>>(classifier: &HeadingClassifier, lines: &[S]) -> Vec<Segment> {
    let headings = find_headings(classifier, lines);

    let Some(first) = headings.first() else {
        return vec![plain_segment(1, WHOLE_DOCUMENT_TITLE, lines, 0, lines.len())];
    };

    let mut segments = Vec::with_capacity(headings.len() + 1);

    let preface = &lines[..first.line_index];
    if preface.iter().any(|line| !line.as_ref().trim().is_empty()) {
        segments.push(plain_segment(
            PREFACE_INDEX,
            PREFACE_TITLE,
            lines,
            0,
            first.line_index,
        ));
    }

    for (i, heading) in headings.iter().enumerate() {
        let start = heading.line_index;
        let end = headings
            .get(i + 1)
            .map(|next| next.line_index)
            .unwrap_or(lines.len());

        segments.push(chapter_segment(i + 1, &heading.title, lines, start, end));
    }

    segments
}

/// Segment whose body is exactly its source lines
fn plain_segment<S: AsRef<str>>(
    index: usize,
    title: &str,
    lines: &[S],
    start: usize,
    end: usize,
) -> Segment {
    Segment {
        index,
        title: title.to_string(),
        start_line: start,
        end_line: end,
        body: to_owned_lines(&lines[start..end]),
        synthetic_header: false,
    }
}

/// Chapter segment; the title is injected unless the body already opens with it
fn chapter_segment<S: AsRef<str>>(
    index: usize,
    title: &str,
    lines: &[S],
    start: usize,
    end: usize,
) -> Segment {
    let source = &lines[start..end];
    let opens_with_title = source
        .first()
        .is_some_and(|line| line.as_ref().trim() == title.trim());

    let mut body = Vec::with_capacity(source.len() + 2);
    if !opens_with_title {
        body.push(title.to_string());
        body.push(String::new());
    }
    body.extend(to_owned_lines(source));

    Segment {
        index,
        title: title.to_string(),
        start_line: start,
        end_line: end,
        body,
        synthetic_header: !opens_with_title,
    }
}

fn to_owned_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines.iter().map(|line| line.as_ref().to_string()).collect()
}
