use regex::Regex;

/// Suffix marking a side-story heading
pub const SIDE_STORY_MARKER: &str = "外传";

/// Optional "第N卷" volume prefix, then a mandatory "第N章" marker, then any title
const VOLUME_CHAPTER_PATTERN: &str =
    r"^(((?:第[一二三四五六七八九十百千0-9]+卷)[^\n\r]*?)?第[一二三四五六七八九十百千0-9]+章[^\n\r]*)$";

/// Up to 40 characters ending in the side-story suffix
const SIDE_STORY_PATTERN: &str = r"^(.{0,40}?外传)$";

/// Rule families, in default priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingKind {
    /// Numbered chapter, optionally inside a numbered volume
    Chapter,
    /// Unnumbered side story
    SideStory,
}

/// Post-match check: `(title, trimmed_line) -> accept`
pub type HeadingGuard = fn(&str, &str) -> bool;

/// One pattern/extractor pair in the classifier table
#[derive(Clone)]
pub struct HeadingRule {
    pub kind: HeadingKind,
    pattern: Regex,
    pub(crate) guard: Option<HeadingGuard>,
}

impl HeadingRule {
    /// Build a rule from a whole-line pattern.
    ///
    /// If the pattern has a capture group, group 1 becomes the title;
    /// otherwise the whole trimmed line does.
    pub fn new(kind: HeadingKind, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            kind,
            pattern: Regex::new(pattern)?,
            guard: None,
        })
    }

    pub fn with_guard(mut self, guard: HeadingGuard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Try this rule against an already-trimmed, non-empty line
    pub(crate) fn extract(&self, text: &str) -> Option<String> {
        let captures = self.pattern.captures(text)?;
        let title = captures
            .get(1)
            .map(|m| m.as_str())
            .unwrap_or(text)
            .trim()
            .to_string();

        match self.guard {
            Some(guard) if !guard(&title, text) => None,
            _ => Some(title),
        }
    }
}

/// A bare suffix only counts when it is the whole line
fn side_story_guard(title: &str, line: &str) -> bool {
    title != SIDE_STORY_MARKER || line.chars().count() == SIDE_STORY_MARKER.chars().count()
}

/// The volume/chapter rule, then the side-story rule
pub fn default_rules() -> Vec<HeadingRule> {
    let volume_chapter = HeadingRule {
        kind: HeadingKind::Chapter,
        pattern: Regex::new(VOLUME_CHAPTER_PATTERN).expect("volume/chapter pattern is valid"),
        guard: None,
    };
    let side_story = HeadingRule {
        kind: HeadingKind::SideStory,
        pattern: Regex::new(SIDE_STORY_PATTERN).expect("side-story pattern is valid"),
        guard: Some(side_story_guard),
    };

    vec![volume_chapter, side_story]
}
