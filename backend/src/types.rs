//! Data structures shared by the extraction pipeline and the JSON output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One verse of a chapter. The label is a display string, e.g. "12" or "12-13".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    #[serde(rename = "verse")]
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(rename = "chapter")]
    pub number: u32,
    pub verses: Vec<Verse>,
}

impl Chapter {
    pub fn new(number: u32) -> Self {
        Self { number, verses: Vec::new() }
    }
}

/// The converted form of one book, written out as `<code>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(rename = "book")]
    pub source_title: String,
    /// Older outputs named this key `book_amharic`.
    #[serde(rename = "book_target", alias = "book_amharic")]
    pub target_title: String,
    pub chapters: Vec<Chapter>,
}

/// Result of a title lookup. `mapped` is false when the fallback pair was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTitle {
    pub source: String,
    pub target: String,
    pub mapped: bool,
}

/// Which extraction path a book goes through, selected from the documents present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// TOC, primary and chapter documents
    Full,
    /// TOC and chapter documents
    NoPrimary,
    /// Chapter documents only
    ChaptersOnly,
}

impl Strategy {
    pub fn from_capabilities(has_primary: bool, has_toc: bool) -> Self {
        match (has_primary, has_toc) {
            (true, true) => Strategy::Full,
            (false, true) => Strategy::NoPrimary,
            (_, false) => Strategy::ChaptersOnly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Full => "main and TOC files",
            Strategy::NoPrimary => "TOC and chapter files",
            Strategy::ChaptersOnly => "chapter files only",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the chapters-only path arranges verses into chapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChapterLayout {
    /// One chapter entry per verse, sorted by chapter number. Repeated numbers are kept.
    #[default]
    PerVerse,
    /// One chapter entry per chapter number.
    Grouped,
}

/// The documents found for one book code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSet {
    pub code: String,
    pub primary: Option<PathBuf>,
    pub toc: Option<PathBuf>,
    /// Sorted by filename
    pub chapters: Vec<PathBuf>,
}

impl DocumentSet {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            primary: None,
            toc: None,
            chapters: Vec::new(),
        }
    }

    /// None when there are no chapter documents to extract verses from.
    pub fn strategy(&self) -> Option<Strategy> {
        if self.chapters.is_empty() {
            return None;
        }
        Some(Strategy::from_capabilities(self.primary.is_some(), self.toc.is_some()))
    }
}
