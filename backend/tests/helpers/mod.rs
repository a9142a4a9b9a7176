use std::fs;
use std::path::{Path, PathBuf};

use bible_json_backend::types::BookRecord;

pub fn source_dir() -> PathBuf {
    PathBuf::from("tests/data/source")
}

/// Copy the named fixture documents into `dir`.
#[allow(dead_code)]
pub fn copy_sources(dir: &Path, names: &[&str]) {
    for name in names {
        fs::copy(source_dir().join(name), dir.join(name))
            .unwrap_or_else(|e| panic!("Failed to copy {}: {}", name, e));
    }
}

#[allow(dead_code)]
pub fn chapter_numbers(record: &BookRecord) -> Vec<u32> {
    record.chapters.iter().map(|c| c.number).collect()
}

#[allow(dead_code)]
pub fn verse_labels(record: &BookRecord) -> Vec<(u32, String)> {
    record
        .chapters
        .iter()
        .flat_map(|c| c.verses.iter().map(move |v| (c.number, v.label.clone())))
        .collect()
}
