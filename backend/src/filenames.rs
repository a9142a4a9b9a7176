//! Naming convention of the input documents:
//!
//! - `<code>.htm`: the whole book (primary document)
//! - `<code>_toc.htm`: table of contents
//! - `<code>-<digits>.htm`: one chapter

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::FilenameError;
use crate::{HTML_EXT, TOC_SUFFIX};

lazy_static! {
    static ref RE_BOOK_CODE: Regex = Regex::new(r"^[0-9]?[a-z]+$").unwrap();
}

/// The parts of a chapter document name, e.g. `1co-12.htm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterFileName {
    pub code: String,
    pub chapter: u32,
    pub ext: String,
}

/// Parse a chapter document name with the grammar `<code>-<digits>.<ext>`.
///
/// The code is everything before the first `-`. The chapter number is the run of
/// ASCII digits after it, which must be followed by `.` and a non-empty extension.
pub fn parse_chapter_filename(name: &str) -> Result<ChapterFileName, FilenameError> {
    let (code, rest) = name
        .split_once('-')
        .ok_or_else(|| FilenameError::MissingSeparator(name.to_string()))?;

    if code.is_empty() {
        return Err(FilenameError::EmptyCode(name.to_string()));
    }

    let (number, ext) = match rest.split_once('.') {
        Some((number, ext)) => (number, ext),
        None => (rest, ""),
    };

    if number.is_empty() {
        return Err(FilenameError::MissingNumber(name.to_string()));
    }

    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(FilenameError::InvalidNumber {
            name: name.to_string(),
            number: number.to_string(),
        });
    }

    let chapter: u32 = number.parse().map_err(|_| FilenameError::InvalidNumber {
        name: name.to_string(),
        number: number.to_string(),
    })?;

    if ext.is_empty() {
        return Err(FilenameError::MissingExtension(name.to_string()));
    }

    Ok(ChapterFileName {
        code: code.to_string(),
        chapter,
        ext: ext.to_string(),
    })
}

/// Same as [`parse_chapter_filename`] for the file name part of a path.
pub fn parse_chapter_path(path: &Path) -> Result<ChapterFileName, FilenameError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| FilenameError::NotUtf8(path.to_path_buf()))?;
    parse_chapter_filename(name)
}

pub fn file_stem(path: &Path) -> Result<String, FilenameError> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .ok_or_else(|| FilenameError::NotUtf8(path.to_path_buf()))
}

/// gen_toc.htm to gen
pub fn toc_stem(path: &Path) -> Result<String, FilenameError> {
    let stem = file_stem(path)?;
    Ok(stem.replace(TOC_SUFFIX, ""))
}

/// Whether a primary document stem looks like a book code, e.g. `gen` or `1co`.
pub fn is_book_code(stem: &str) -> bool {
    RE_BOOK_CODE.is_match(stem)
}

pub fn primary_filename(code: &str) -> String {
    format!("{}.{}", code, HTML_EXT)
}

pub fn toc_filename(code: &str) -> String {
    format!("{}{}.{}", code, TOC_SUFFIX, HTML_EXT)
}
