mod rules;

#[cfg(test)]
mod tests;

pub use rules::{HeadingGuard, HeadingKind, HeadingRule, SIDE_STORY_MARKER, default_rules};

use std::sync::LazyLock;

static DEFAULT_CLASSIFIER: LazyLock<HeadingClassifier> = LazyLock::new(HeadingClassifier::new);

/// A line recognized as a heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Which rule family matched
    pub kind: HeadingKind,
    /// Trimmed title text
    pub title: String,
}

/// Ordered rule table; the first matching rule wins
pub struct HeadingClassifier {
    rules: Vec<HeadingRule>,
}

impl HeadingClassifier {
    /// Classifier with the volume/chapter rule followed by the side-story rule
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    /// Classifier with a custom rule order
    pub fn with_rules(rules: Vec<HeadingRule>) -> Self {
        Self { rules }
    }

    /// Classify a single line, reporting the rule family that matched
    pub fn classify_heading(&self, line: &str) -> Option<Heading> {
        let text = line.trim();
        if text.is_empty() {
            return None;
        }

        self.rules.iter().find_map(|rule| {
            rule.extract(text).map(|title| Heading {
                kind: rule.kind,
                title,
            })
        })
    }

    /// Classify a single line, returning only the title
    pub fn classify(&self, line: &str) -> Option<String> {
        self.classify_heading(line).map(|heading| heading.title)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared classifier built from [`default_rules`]
pub fn default_classifier() -> &'static HeadingClassifier {
    &DEFAULT_CLASSIFIER
}

/// Classify a line with the default rules
pub fn classify(line: &str) -> Option<String> {
    DEFAULT_CLASSIFIER.classify(line)
}
