use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::BookRecord;
use crate::{get_create_output_dir, JSON_EXT};

/// Pretty-printed JSON with two-space indentation. Non-ASCII text is written as is.
pub fn to_json(record: &BookRecord) -> Result<String> {
    serde_json::to_string_pretty(record).context("Failed to serialize book record")
}

/// Write `<code>.json` into `output_dir`, creating the directory if needed.
pub fn write_book_json(output_dir: &Path, code: &str, record: &BookRecord) -> Result<PathBuf> {
    let output_dir = get_create_output_dir(output_dir)?;
    let output_file = output_dir.join(format!("{}.{}", code, JSON_EXT));

    let json = to_json(record)?;
    fs::write(&output_file, json)
        .with_context(|| format!("Failed to write file: {}", output_file.display()))?;

    Ok(output_file)
}

pub fn read_book_json(path: &Path) -> Result<BookRecord> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let record: BookRecord = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse book JSON: {}", path.display()))?;
    Ok(record)
}
