use std::path::PathBuf;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use bible_json_backend::book_mapping::BookMappingTable;
use bible_json_backend::discovery::{candidate_codes, discover_document_set};
use bible_json_backend::extraction::BookExtractor;
use bible_json_backend::logger;
use bible_json_backend::output::write_book_json;
use bible_json_backend::types::ChapterLayout;

#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Only these codes, when given
    pub books: Option<Vec<String>>,
    pub layout: ChapterLayout,
    pub show_progress: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchStats {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub unmapped: usize,
    pub written: Vec<PathBuf>,
}

enum BookOutcome {
    Written(PathBuf),
    Skipped,
}

/// Convert every book found in the input directory.
///
/// A book which fails is logged and counted, and the run continues with the next one.
/// Only an unreadable input directory fails the whole run.
pub fn run_batch(config: &ConvertConfig, table: &BookMappingTable) -> Result<BatchStats> {
    logger::info("Starting Bible parsing");

    let mut codes = candidate_codes(&config.input_dir, table)?;
    if let Some(books) = &config.books {
        let wanted: Vec<String> = books.iter().map(|b| b.to_lowercase()).collect();
        codes.retain(|c| wanted.contains(c));
        for w in wanted.iter() {
            if !codes.contains(w) {
                codes.push(w.clone());
            }
        }
    }

    let extractor = BookExtractor::new(table).with_layout(config.layout);
    let mut stats = BatchStats::default();

    let pb = ProgressBar::new(codes.len() as u64);
    if !config.show_progress {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    for code in codes.iter() {
        pb.set_message(code.clone());

        match convert_book(config, table, &extractor, code) {
            Ok(BookOutcome::Written(path)) => {
                stats.processed += 1;
                if !table.contains(code) {
                    stats.unmapped += 1;
                }
                stats.written.push(path);
            }
            Ok(BookOutcome::Skipped) => stats.skipped += 1,
            Err(e) => {
                logger::error(&format!("Failed to parse {}: {:#}", code, e));
                stats.failed += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");

    logger::info(&format!(
        "Finished Bible parsing: {} written, {} skipped, {} failed",
        stats.processed, stats.skipped, stats.failed
    ));

    Ok(stats)
}

fn convert_book(
    config: &ConvertConfig,
    table: &BookMappingTable,
    extractor: &BookExtractor,
    code: &str,
) -> Result<BookOutcome> {
    let book_name = table.resolve(code).source;
    let docs = discover_document_set(&config.input_dir, code)?;

    let Some(strategy) = docs.strategy() else {
        if docs.primary.is_some() || docs.toc.is_some() {
            logger::warn(&format!("Skipping {} due to missing chapter files.", book_name));
        } else {
            logger::debug(&format!("No documents for {}", code));
        }
        return Ok(BookOutcome::Skipped);
    };

    logger::info(&format!("Processing {} with {}...", book_name, strategy));

    let record = extractor.extract_with(&docs, strategy)?;
    let output_file = write_book_json(&config.output_dir, code, &record)?;

    logger::info(&format!("Successfully created {} ({})", output_file.display(), strategy));

    Ok(BookOutcome::Written(output_file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bible_json_backend::book_mapping::default_table;
    use bible_json_backend::output::read_book_json;
    use std::fs;
    use std::path::Path;

    fn write_verses(path: &Path, verses: &[&str]) {
        let body: String = verses
            .iter()
            .map(|v| format!("<p><font face=\"GF Zemen Unicode\">{}</font></p>\n", v))
            .collect();
        fs::write(path, format!("<html><body>\n{}</body></html>\n", body)).unwrap();
    }

    fn config(input_dir: &Path, output_dir: &Path) -> ConvertConfig {
        ConvertConfig {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            books: None,
            layout: ChapterLayout::PerVerse,
            show_progress: false,
        }
    }

    #[test]
    fn test_batch_continues_after_failed_book() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("source");
        let output = dir.path().join("json");
        fs::create_dir(&input).unwrap();

        // full set
        fs::write(input.join("rut.htm"), "").unwrap();
        fs::write(input.join("rut_toc.htm"), r#"<a href="rut-1.htm">Chapter 1</a>"#).unwrap();
        write_verses(&input.join("rut-1.htm"), &["1 a"]);

        // TOC link without a chapter number fails this book
        fs::write(input.join("gen.htm"), "").unwrap();
        fs::write(input.join("gen_toc.htm"), r#"<a href="gen-1.htm">Genesis</a>"#).unwrap();
        write_verses(&input.join("gen-1.htm"), &["1 a"]);

        // chapters only
        write_verses(&input.join("jud-1.htm"), &["1 a", "2 b"]);

        // TOC but no chapters
        fs::write(input.join("oba_toc.htm"), "").unwrap();

        let stats = run_batch(&config(&input, &output), default_table()).unwrap();
        assert_eq!(stats.processed, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.skipped, 63);
        assert_eq!(stats.unmapped, 0);

        assert!(output.join("rut.json").exists());
        assert!(!output.join("gen.json").exists());

        let jude = read_book_json(&output.join("jud.json")).unwrap();
        assert_eq!(jude.source_title, "Jude");
        assert_eq!(jude.chapters.len(), 2);
    }

    #[test]
    fn test_batch_unmapped_book() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("source");
        let output = dir.path().join("json");
        fs::create_dir(&input).unwrap();

        fs::write(input.join("tob.htm"), "").unwrap();
        fs::write(input.join("tob_toc.htm"), r#"<a href="tob-1.htm">1</a>"#).unwrap();
        write_verses(&input.join("tob-1.htm"), &["1 a"]);

        let mut cfg = config(&input, &output);
        cfg.books = Some(vec!["TOB".to_string()]);

        let stats = run_batch(&cfg, default_table()).unwrap();
        assert_eq!(stats.processed, 1);
        assert_eq!(stats.unmapped, 1);
        assert_eq!(stats.skipped, 0);

        let record = read_book_json(&output.join("tob.json")).unwrap();
        assert_eq!(record.source_title, "tob");
        assert_eq!(record.target_title, "Unknown Book");
    }

    #[test]
    fn test_batch_missing_input_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir.path().join("missing"), &dir.path().join("json"));
        assert!(run_batch(&cfg, default_table()).is_err());
    }
}
