mod batch;

use std::path::PathBuf;
use std::process::exit;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use thiserror::Error;

use bible_json_backend::book_mapping::{default_table, BookMappingTable};
use bible_json_backend::logger;
use bible_json_backend::types::ChapterLayout;

use crate::batch::{run_batch, ConvertConfig};

#[derive(Error, Debug)]
enum CliError {
    #[error("Input directory does not exist or is not a directory: {0:?}")]
    InputDirNotFound(PathBuf),
    #[error("Output path exists and is not a directory: {0:?}")]
    OutputNotDir(PathBuf),
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert legacy Bible HTML books to JSON", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path of the log file.
    #[arg(long, global = true, value_name = "FILE_PATH", env = "LOG_FILE", default_value = "bible_json.log")]
    log_file: PathBuf,

    /// Log level: silent, error, warn, info, debug
    #[arg(long, global = true, value_name = "LEVEL", env = "LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert the books in the input directory to one JSON file per book
    Convert {
        /// Directory with the <code>.htm, <code>_toc.htm and <code>-<N>.htm documents
        #[arg(long, value_name = "DIRECTORY_PATH", env = "BIBLE_INPUT_DIR", default_value = "source")]
        input_dir: PathBuf,

        /// Directory for the <code>.json files, created if missing
        #[arg(long, value_name = "DIRECTORY_PATH", env = "BIBLE_OUTPUT_DIR", default_value = "json")]
        output_dir: PathBuf,

        /// Only convert these book codes (comma separated)
        #[arg(long, value_name = "CODES", value_delimiter = ',')]
        books: Option<Vec<String>>,

        /// Without a TOC, put all verses of a chapter in one chapter entry,
        /// instead of one entry per verse
        #[arg(long, default_value_t = false)]
        group_chapters: bool,

        /// Don't show the progress bar
        #[arg(long, default_value_t = false)]
        no_progress: bool,
    },

    /// List the book codes with their titles
    Books,

    /// Print the title pair of a book code
    #[command(arg_required_else_help = true)]
    Resolve {
        /// Book code, e.g. gen, 1co
        code: String,
    },
}

fn convert(config: ConvertConfig, table: &BookMappingTable) -> Result<()> {
    if !config.input_dir.is_dir() {
        return Err(CliError::InputDirNotFound(config.input_dir).into());
    }
    if config.output_dir.exists() && !config.output_dir.is_dir() {
        return Err(CliError::OutputNotDir(config.output_dir).into());
    }

    let stats = run_batch(&config, table)?;

    println!(
        "Written: {}, skipped: {}, failed: {}, unmapped titles: {}",
        stats.processed, stats.skipped, stats.failed, stats.unmapped
    );
    if stats.failed > 0 {
        println!("See the log file for the errors.");
    }

    Ok(())
}

fn list_books(table: &BookMappingTable) -> Result<()> {
    for m in table.iter() {
        println!("{}\t{}\t{}", m.code, m.source_name, m.target_name);
    }
    Ok(())
}

fn resolve_code(table: &BookMappingTable, code: &str) -> Result<()> {
    let title = table.resolve(code);
    println!("{}\t{}", title.source, title.target);
    if !title.mapped {
        eprintln!("No mapping found for {}", code);
    }
    Ok(())
}

fn main() {
    // LOG_FILE, LOG_LEVEL and the directories can be set in .env
    if dotenv().is_err() {
        println!("Info: No .env file found or failed to load.");
    }

    let cli = Cli::parse();

    logger::init_with_file(&cli.log_file);
    if let Some(level) = &cli.log_level {
        if !logger::set_log_level_str(level) {
            eprintln!("Unknown log level: {}", level);
            exit(1);
        }
    }

    let table = default_table();

    let command_result = match cli.command {
        Commands::Convert { input_dir, output_dir, books, group_chapters, no_progress } => {
            let layout = if group_chapters {
                ChapterLayout::Grouped
            } else {
                ChapterLayout::PerVerse
            };
            convert(
                ConvertConfig {
                    input_dir,
                    output_dir,
                    books,
                    layout,
                    show_progress: !no_progress,
                },
                table,
            )
        }

        Commands::Books => list_books(table),

        Commands::Resolve { code } => resolve_code(table, &code),
    };

    if let Err(e) = command_result {
        eprintln!("Error executing command: {:#}", e);
        exit(1);
    }
}
