//! novelpub CLI - turn plain-text novels into EPUB books

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use novelpub_core::decoder::EncodingChoice;
use novelpub_core::Language;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse and validate jobs argument (must be at least 1)
fn parse_jobs(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("jobs must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

#[derive(Parser)]
#[command(name = "novelpub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a text novel to EPUB
    Convert {
        /// Input text file
        input: PathBuf,

        /// Output EPUB file
        #[arg(short, long)]
        output: PathBuf,

        /// Book title (defaults to the input file name)
        #[arg(long)]
        title: Option<String>,

        /// Book author
        #[arg(long, default_value = "")]
        author: String,

        /// Book language (zh-CN, en)
        #[arg(short, long, default_value = "zh-CN")]
        language: Language,

        /// Input encoding, or "auto" to detect it
        #[arg(short, long, default_value = "auto")]
        encoding: EncodingChoice,

        /// Cover image (jpg, png, gif, webp, svg)
        #[arg(long)]
        cover: Option<PathBuf>,

        /// Join consecutive non-blank lines into one paragraph
        #[arg(long)]
        merge_paragraphs: bool,

        /// Rename a chapter, given as POSITION=TITLE (1-based)
        #[arg(long, value_name = "POSITION=TITLE")]
        rename: Vec<String>,

        /// Merge the chapter at POSITION into the one before it (1-based)
        #[arg(long, value_name = "POSITION")]
        merge: Vec<usize>,
    },

    /// Show detected encoding and chapters of a text novel
    Info {
        /// Input text file
        input: PathBuf,

        /// Book language (zh-CN, en)
        #[arg(short, long, default_value = "zh-CN")]
        language: Language,

        /// Input encoding, or "auto" to detect it
        #[arg(short, long, default_value = "auto")]
        encoding: EncodingChoice,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Batch convert every .txt file in a directory
    Batch {
        /// Input directory
        input_dir: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Book language (zh-CN, en)
        #[arg(short, long, default_value = "zh-CN")]
        language: Language,

        /// Input encoding, or "auto" to detect it
        #[arg(short, long, default_value = "auto")]
        encoding: EncodingChoice,

        /// Number of parallel jobs (must be at least 1)
        #[arg(short, long, default_value = "4", value_parser = parse_jobs)]
        jobs: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG takes precedence over --verbose
    let default_filter = if cli.verbose {
        "novelpub_cli=debug,novelpub_core=debug"
    } else {
        "novelpub_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            title,
            author,
            language,
            encoding,
            cover,
            merge_paragraphs,
            rename,
            merge,
        } => {
            let options = commands::ConvertOptions {
                title,
                author,
                language,
                encoding,
                cover,
                merge_paragraphs,
                renames: rename,
                merges: merge,
            };
            commands::convert(&input, &output, options).await
        }

        Commands::Info {
            input,
            language,
            encoding,
            json,
        } => commands::info(&input, language, &encoding, json).await,

        Commands::Batch {
            input_dir,
            output_dir,
            language,
            encoding,
            jobs,
        } => commands::batch(&input_dir, &output_dir, language, &encoding, jobs),
    }
}
