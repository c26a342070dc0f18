use crate::error::SplitError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Well-known manifest file name inside every output directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// One emitted chapter file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    pub index: usize,
    pub title: String,
    pub file: String,
}

/// Everything a reader needs to find the chapters of one book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Output directory, as given on the command line
    pub book: String,
    /// Original source path
    pub source: String,
    /// Declared encoding, as given
    pub encoding: String,
    pub chapters: Vec<ChapterRecord>,
}

impl Manifest {
    /// Assemble a manifest from records in emission order
    pub fn new(
        book: impl Into<String>,
        source: impl Into<String>,
        encoding: impl Into<String>,
        chapters: Vec<ChapterRecord>,
    ) -> Self {
        Self {
            book: book.into(),
            source: source.into(),
            encoding: encoding.into(),
            chapters,
        }
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Pretty JSON with two-space indentation; non-ASCII is kept literal
    pub fn to_json(&self) -> Result<String, SplitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write `manifest.json` into `out_dir`, replacing any previous one.
    ///
    /// Nothing is written when the chapter list fails [`Manifest::validate`].
    pub fn write_to_dir(&self, out_dir: &Path) -> Result<PathBuf, SplitError> {
        self.validate()?;
        let path = out_dir.join(MANIFEST_FILE);
        let json = self.to_json()?;
        fs::write(&path, json).map_err(|e| SplitError::io(&path, e))?;

        debug!(path = %path.display(), chapters = self.chapters.len(), "manifest written");
        Ok(path)
    }

    /// Read `manifest.json` back from an output directory and validate it
    pub fn load(out_dir: &Path) -> Result<Self, SplitError> {
        let path = out_dir.join(MANIFEST_FILE);
        let contents = fs::read_to_string(&path).map_err(|e| SplitError::io(&path, e))?;
        let manifest: Self = serde_json::from_str(&contents)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check ordering, contiguity and file-name uniqueness of the chapter list
    pub fn validate(&self) -> Result<(), SplitError> {
        let Some(first) = self.chapters.first() else {
            return Err(SplitError::InvalidManifest("no chapters".to_string()));
        };
        if first.index > 1 {
            return Err(SplitError::InvalidManifest(format!(
                "first chapter index is {}, expected 0 or 1",
                first.index
            )));
        }

        for pair in self.chapters.windows(2) {
            if pair[1].index != pair[0].index + 1 {
                return Err(SplitError::InvalidManifest(format!(
                    "chapter index {} follows {}",
                    pair[1].index, pair[0].index
                )));
            }
        }

        let mut seen = HashSet::new();
        for chapter in &self.chapters {
            if !seen.insert(chapter.file.as_str()) {
                return Err(SplitError::InvalidManifest(format!(
                    "duplicate file name: {}",
                    chapter.file
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, title: &str) -> ChapterRecord {
        ChapterRecord {
            index,
            title: title.to_string(),
            file: format!("{:04}_{}.txt", index, title),
        }
    }

    fn sample() -> Manifest {
        Manifest::new(
            "凡人修仙传",
            "1.txt",
            "gb2312",
            vec![record(0, "开篇"), record(1, "第一章 起源")],
        )
    }

    #[test]
    fn test_json_field_order_and_literal_cjk() {
        let json = sample().to_json().unwrap();

        let book = json.find("\"book\"").unwrap();
        let source = json.find("\"source\"").unwrap();
        let encoding = json.find("\"encoding\"").unwrap();
        let chapters = json.find("\"chapters\"").unwrap();
        assert!(book < source && source < encoding && encoding < chapters);

        assert!(json.contains("\"book\": \"凡人修仙传\""));
        assert!(!json.contains("\\u"));
        assert!(json.contains("\n  \"source\""));
    }

    #[test]
    fn test_write_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = sample();

        let path = manifest.write_to_dir(dir.path()).unwrap();
        assert_eq!(path, dir.path().join(MANIFEST_FILE));

        let loaded = Manifest::load(dir.path()).unwrap();
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        sample().write_to_dir(dir.path()).unwrap();

        let smaller = Manifest::new("b", "s", "utf-8", vec![record(1, "全文")]);
        smaller.write_to_dir(dir.path()).unwrap();

        assert_eq!(Manifest::load(dir.path()).unwrap().chapter_count(), 1);
    }

    #[test]
    fn test_validate_accepts_preface_or_chapter_start() {
        assert!(sample().validate().is_ok());

        let from_one = Manifest::new("b", "s", "utf-8", vec![record(1, "a"), record(2, "b")]);
        assert!(from_one.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_gaps() {
        let gap = Manifest::new("b", "s", "utf-8", vec![record(1, "a"), record(3, "c")]);
        let err = gap.validate().unwrap_err();
        assert!(err.to_string().contains("follows"));
    }

    #[test]
    fn test_validate_rejects_duplicate_files() {
        let mut dup = Manifest::new("b", "s", "utf-8", vec![record(1, "a"), record(2, "b")]);
        dup.chapters[1].file = dup.chapters[0].file.clone();
        let err = dup.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate file name"));
    }

    #[test]
    fn test_validate_rejects_empty() {
        let empty = Manifest::new("b", "s", "utf-8", vec![]);
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_write_refuses_invalid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let gap = Manifest::new("b", "s", "utf-8", vec![record(1, "a"), record(3, "c")]);

        assert!(matches!(
            gap.write_to_dir(dir.path()),
            Err(SplitError::InvalidManifest(_))
        ));
        assert!(!dir.path().join(MANIFEST_FILE).exists());
    }

    #[test]
    fn test_load_rejects_invalid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let gap = Manifest::new("b", "s", "utf-8", vec![record(1, "a"), record(3, "c")]);
        fs::write(dir.path().join(MANIFEST_FILE), gap.to_json().unwrap()).unwrap();

        assert!(matches!(
            Manifest::load(dir.path()),
            Err(SplitError::InvalidManifest(_))
        ));
    }

    #[test]
    fn test_load_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Manifest::load(dir.path()),
            Err(SplitError::Io { .. })
        ));
    }
}
