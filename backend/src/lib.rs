pub mod types;
pub mod errors;
pub mod logger;
pub mod book_mapping;
pub mod filenames;
pub mod encoding;
pub mod verse;
pub mod toc;
pub mod extraction;
pub mod discovery;
pub mod output;

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Target title used when a book code has no entry in the mapping table.
pub static UNKNOWN_BOOK: &str = "Unknown Book";

/// Font face which marks the verse run inside a chapter paragraph.
pub static VERSE_FONT_FACE: &str = "GF Zemen Unicode";

/// Glyph joining several verse numbers into one combined label.
pub static VERSE_JOIN_GLYPH: char = '፤';

/// Encoded form of the join glyph, left in some paragraphs as literal text.
pub static VERSE_NUMBER_ARTIFACT: &str = "&#4964;";

pub static HTML_EXT: &str = "htm";
pub static TOC_SUFFIX: &str = "_toc";
pub static JSON_EXT: &str = "json";

pub fn get_create_output_dir(output_dir: &Path) -> Result<PathBuf> {
    if !output_dir.exists() {
        create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;
        logger::info(&format!("Created directory: {}", output_dir.display()));
    }
    Ok(output_dir.to_path_buf())
}
