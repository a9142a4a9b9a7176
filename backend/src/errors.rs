use std::path::PathBuf;

use thiserror::Error;

/// A filename which doesn't follow `<code>-<digits>.<ext>`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilenameError {
    #[error("Filename is not valid UTF-8: {0:?}")]
    NotUtf8(PathBuf),
    #[error("No '-' separator before the chapter number in: {0}")]
    MissingSeparator(String),
    #[error("Empty book code in: {0}")]
    EmptyCode(String),
    #[error("No chapter number after '-' in: {0}")]
    MissingNumber(String),
    #[error("Invalid chapter number '{number}' in: {name}")]
    InvalidNumber { name: String, number: String },
    #[error("No file extension in: {0}")]
    MissingExtension(String),
}

/// Failures which abort the extraction of one book.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Filename(#[from] FilenameError),
    #[error("TOC link '{href}' has no chapter number in its text: '{text}'")]
    TocChapterNumber { href: String, text: String },
    #[error("{0} requires a table of contents document")]
    MissingToc(String),
    #[error("{0} requires a primary book document")]
    MissingPrimary(String),
    #[error("No chapter documents for {0}")]
    NoChapterDocuments(String),
}
