use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::book_mapping::BookMappingTable;
use crate::filenames::{is_book_code, parse_chapter_filename, primary_filename, toc_filename};
use crate::types::DocumentSet;
use crate::HTML_EXT;

/// File names of the `.htm` documents directly inside `input_dir`, sorted.
fn html_file_names(input_dir: &Path) -> Result<Vec<String>> {
    if !input_dir.is_dir() {
        anyhow::bail!("Input directory not found: {}", input_dir.display());
    }

    let mut names = Vec::new();

    for entry in WalkDir::new(input_dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("Failed to read directory: {}", input_dir.display()))?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some(HTML_EXT) {
            continue;
        }

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

/// Find the primary, TOC and chapter documents of a book.
pub fn discover_document_set(input_dir: &Path, code: &str) -> Result<DocumentSet> {
    let mut docs = DocumentSet::new(code);

    let primary = input_dir.join(primary_filename(code));
    if primary.is_file() {
        docs.primary = Some(primary);
    }

    let toc = input_dir.join(toc_filename(code));
    if toc.is_file() {
        docs.toc = Some(toc);
    }

    docs.chapters = html_file_names(input_dir)?
        .into_iter()
        .filter(|name| match parse_chapter_filename(name) {
            Ok(f) => f.code == code,
            Err(_) => false,
        })
        .map(|name| input_dir.join(name))
        .collect::<Vec<PathBuf>>();

    tracing::debug!(
        "Documents for {}: primary={}, toc={}, chapters={}",
        code,
        docs.primary.is_some(),
        docs.toc.is_some(),
        docs.chapters.len()
    );

    Ok(docs)
}

/// Book codes to process: the table's codes in table order, then codes of other
/// primary documents in the input directory, sorted.
pub fn candidate_codes(input_dir: &Path, table: &BookMappingTable) -> Result<Vec<String>> {
    let mut codes: Vec<String> = table.codes().map(|c| c.to_string()).collect();

    let extra: BTreeSet<String> = html_file_names(input_dir)?
        .into_iter()
        .filter_map(|name| {
            let stem = name.strip_suffix(&format!(".{}", HTML_EXT))?.to_lowercase();
            if is_book_code(&stem) && !table.contains(&stem) {
                Some(stem)
            } else {
                None
            }
        })
        .collect();

    codes.extend(extra);
    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Strategy;
    use std::fs;

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), "").unwrap();
        }
    }

    #[test]
    fn test_discover_full_set() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path();
        touch(d, &["gen.htm", "gen_toc.htm", "gen-1.htm", "gen-10.htm", "gen-2.htm", "exo-1.htm", "genesis-1.htm"]);

        let docs = discover_document_set(d, "gen").unwrap();
        assert_eq!(docs.primary, Some(d.join("gen.htm")));
        assert_eq!(docs.toc, Some(d.join("gen_toc.htm")));
        assert_eq!(
            docs.chapters,
            vec![d.join("gen-1.htm"), d.join("gen-10.htm"), d.join("gen-2.htm")]
        );
        assert_eq!(docs.strategy(), Some(Strategy::Full));
    }

    #[test]
    fn test_discover_strategies() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path();
        touch(d, &["mat_toc.htm", "mat-1.htm", "mar-1.htm", "luk.htm", "luk_toc.htm"]);

        assert_eq!(discover_document_set(d, "mat").unwrap().strategy(), Some(Strategy::NoPrimary));
        assert_eq!(discover_document_set(d, "mar").unwrap().strategy(), Some(Strategy::ChaptersOnly));
        assert_eq!(discover_document_set(d, "luk").unwrap().strategy(), None);
        assert_eq!(discover_document_set(d, "joh").unwrap().strategy(), None);
    }

    #[test]
    fn test_discover_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path();
        touch(d, &["rev-1.html", "rev-1.htm.bak", "rev-a.htm", "rev-2.htm"]);
        fs::create_dir(d.join("rev-3.htm")).unwrap();

        let docs = discover_document_set(d, "rev").unwrap();
        assert_eq!(docs.chapters, vec![d.join("rev-2.htm")]);
    }

    #[test]
    fn test_discover_missing_dir() {
        let result = discover_document_set(Path::new("no/such/dir"), "gen");
        assert!(result.is_err());
    }

    #[test]
    fn test_candidate_codes() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path();
        touch(d, &["gen.htm", "tob.htm", "1ma.htm", "sir_toc.htm", "bar-1.htm", "index.htm"]);

        let table = BookMappingTable::from_tuples(&[("gen", "Genesis", "ዘፍጥረት"), ("exo", "Exodus", "ዘጸአት")]);
        let codes = candidate_codes(d, &table).unwrap();
        assert_eq!(codes, vec!["gen", "exo", "1ma", "index", "tob"]);
    }
}
