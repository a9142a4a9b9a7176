//! Building a [`BookRecord`] from the documents of one book.
//!
//! The three extraction paths share one pipeline and differ only in where the
//! book title comes from and whether the chapter list is seeded from a table of
//! contents:
//!
//! | Strategy       | Title from            | Chapters                          |
//! |----------------|-----------------------|-----------------------------------|
//! | `Full`         | primary document stem | seeded from TOC                   |
//! | `NoPrimary`    | TOC stem              | seeded from TOC                   |
//! | `ChaptersOnly` | book code             | built from chapter documents      |

use std::path::{Path, PathBuf};

use crate::book_mapping::BookMappingTable;
use crate::encoding::read_legacy_html;
use crate::errors::ExtractError;
use crate::filenames::{file_stem, parse_chapter_path, toc_stem};
use crate::logger;
use crate::toc::toc_chapter_numbers;
use crate::types::{BookRecord, Chapter, ChapterLayout, DocumentSet, ResolvedTitle, Strategy, Verse};
use crate::verse::extract_verses;

pub struct BookExtractor<'a> {
    table: &'a BookMappingTable,
    layout: ChapterLayout,
}

impl<'a> BookExtractor<'a> {
    pub fn new(table: &'a BookMappingTable) -> Self {
        Self {
            table,
            layout: ChapterLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: ChapterLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Extract with the strategy the document set supports.
    pub fn extract(&self, docs: &DocumentSet) -> Result<BookRecord, ExtractError> {
        let strategy = docs
            .strategy()
            .ok_or_else(|| ExtractError::NoChapterDocuments(docs.code.clone()))?;
        self.extract_with(docs, strategy)
    }

    pub fn extract_with(&self, docs: &DocumentSet, strategy: Strategy) -> Result<BookRecord, ExtractError> {
        let stem = match strategy {
            Strategy::Full => {
                let primary = docs
                    .primary
                    .as_ref()
                    .ok_or_else(|| ExtractError::MissingPrimary(docs.code.clone()))?;
                // Only the name of the primary document is used, but an unreadable file fails the book.
                read_document(primary)?;
                file_stem(primary)?
            }
            Strategy::NoPrimary => {
                let toc = docs
                    .toc
                    .as_ref()
                    .ok_or_else(|| ExtractError::MissingToc(docs.code.clone()))?;
                toc_stem(toc)?
            }
            Strategy::ChaptersOnly => docs.code.clone(),
        };

        let title = self.resolve_title(&stem);

        let chapters = match strategy {
            Strategy::Full | Strategy::NoPrimary => {
                let toc = docs
                    .toc
                    .as_ref()
                    .ok_or_else(|| ExtractError::MissingToc(docs.code.clone()))?;
                let mut chapters = seed_chapters(toc, &stem)?;
                fill_seeded_chapters(&mut chapters, &docs.chapters)?;
                chapters
            }
            Strategy::ChaptersOnly => match self.layout {
                ChapterLayout::PerVerse => chapter_per_verse(&docs.chapters)?,
                ChapterLayout::Grouped => grouped_chapters(&docs.chapters)?,
            },
        };

        logger::info(&format!(
            "Extracted {} ({}) from {}: {} chapter entries, target title: {}",
            docs.code,
            title.source,
            strategy,
            chapters.len(),
            title.target
        ));

        Ok(BookRecord {
            source_title: title.source,
            target_title: title.target,
            chapters,
        })
    }

    fn resolve_title(&self, code: &str) -> ResolvedTitle {
        let title = self.table.resolve(code);
        if title.mapped {
            logger::debug(&format!(
                "Using mapping for {}: source='{}', target='{}'",
                code, title.source, title.target
            ));
        } else {
            logger::warn(&format!("No mapping found for {}, using default target title.", code));
        }
        title
    }
}

/// Whole-book document, TOC and chapter documents are all present.
pub fn parse_full(
    table: &BookMappingTable,
    toc: &Path,
    chapter_files: &[PathBuf],
    primary: &Path,
) -> Result<BookRecord, ExtractError> {
    let docs = DocumentSet {
        code: file_stem(primary)?,
        primary: Some(primary.to_path_buf()),
        toc: Some(toc.to_path_buf()),
        chapters: chapter_files.to_vec(),
    };
    BookExtractor::new(table).extract_with(&docs, Strategy::Full)
}

/// The whole-book document is missing, the title comes from the TOC filename.
pub fn parse_no_primary(
    table: &BookMappingTable,
    toc: &Path,
    chapter_files: &[PathBuf],
) -> Result<BookRecord, ExtractError> {
    let docs = DocumentSet {
        code: toc_stem(toc)?,
        primary: None,
        toc: Some(toc.to_path_buf()),
        chapters: chapter_files.to_vec(),
    };
    BookExtractor::new(table).extract_with(&docs, Strategy::NoPrimary)
}

/// No TOC, chapters are built from the chapter documents alone.
///
/// `chapter_files` are expected sorted by filename.
pub fn parse_chapters_only(
    table: &BookMappingTable,
    code: &str,
    chapter_files: &[PathBuf],
    layout: ChapterLayout,
) -> Result<BookRecord, ExtractError> {
    let mut docs = DocumentSet::new(code);
    docs.chapters = chapter_files.to_vec();
    BookExtractor::new(table)
        .with_layout(layout)
        .extract_with(&docs, Strategy::ChaptersOnly)
}

fn read_document(path: &Path) -> Result<String, ExtractError> {
    read_legacy_html(path).map_err(|e| ExtractError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Empty chapters for each chapter number in the TOC, ordered by number.
fn seed_chapters(toc: &Path, stem: &str) -> Result<Vec<Chapter>, ExtractError> {
    let html = read_document(toc)?;
    let mut numbers = toc_chapter_numbers(&html, stem)?;
    numbers.sort();

    logger::debug(&format!("Parsed chapter numbers from TOC: {:?}", numbers));

    Ok(numbers.into_iter().map(Chapter::new).collect())
}

/// Verses of each chapter document, with the chapter number from its filename.
fn chapter_documents(chapter_files: &[PathBuf]) -> impl Iterator<Item = Result<(u32, Vec<Verse>), ExtractError>> + '_ {
    chapter_files.iter().map(|path| -> Result<(u32, Vec<Verse>), ExtractError> {
        let number = parse_chapter_path(path)?.chapter;
        let html = read_document(path)?;
        Ok((number, extract_verses(&html)))
    })
}

fn fill_seeded_chapters(chapters: &mut [Chapter], chapter_files: &[PathBuf]) -> Result<(), ExtractError> {
    for item in chapter_documents(chapter_files) {
        let (number, verses) = item?;

        match chapters.iter_mut().find(|c| c.number == number) {
            Some(chapter) => {
                for verse in verses {
                    logger::debug(&format!(
                        "Parsed verse: Chapter {}, Verse {}: {}",
                        number, verse.label, verse.text
                    ));
                    chapter.verses.push(verse);
                }
            }
            None => {
                if !verses.is_empty() {
                    logger::debug(&format!(
                        "Chapter {} is not in the TOC, dropped {} verses",
                        number,
                        verses.len()
                    ));
                }
            }
        }
    }

    Ok(())
}

fn chapter_per_verse(chapter_files: &[PathBuf]) -> Result<Vec<Chapter>, ExtractError> {
    let mut chapters: Vec<Chapter> = Vec::new();

    for item in chapter_documents(chapter_files) {
        let (number, verses) = item?;

        for verse in verses {
            chapters.push(Chapter {
                number,
                verses: vec![verse],
            });
        }

        // Stable sort, verses of one chapter stay in document order
        chapters.sort_by_key(|c| c.number);
    }

    Ok(chapters)
}

fn grouped_chapters(chapter_files: &[PathBuf]) -> Result<Vec<Chapter>, ExtractError> {
    let mut chapters: Vec<Chapter> = Vec::new();

    for item in chapter_documents(chapter_files) {
        let (number, verses) = item?;

        if verses.is_empty() {
            continue;
        }

        match chapters.iter_mut().find(|c| c.number == number) {
            Some(chapter) => chapter.verses.extend(verses),
            None => chapters.push(Chapter { number, verses }),
        }
    }

    chapters.sort_by_key(|c| c.number);

    Ok(chapters)
}
