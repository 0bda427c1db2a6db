//! Batch conversion command implementation

use anyhow::{bail, Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use novelpub_core::decoder::{EncodingChoice, TxtDecoder};
use novelpub_core::encoder::{encode_to_path, Encoder, EpubEncoder};
use novelpub_core::{BookMeta, Language};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Batch convert every text novel in a directory
pub fn batch(
    input_dir: &Path,
    output_dir: &Path,
    language: Language,
    encoding: &EncodingChoice,
    jobs: usize,
) -> Result<()> {
    // Ensure output directory exists
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    // Find all text files
    let mut files: Vec<_> = fs::read_dir(input_dir)
        .with_context(|| format!("Failed to read input directory: {}", input_dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("txt"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    if files.is_empty() {
        println!("No .txt files found in {}", input_dir.display());
        return Ok(());
    }

    println!("Found {} files to convert", files.len());

    let encoder = EpubEncoder::new();

    // Set up progress tracking
    let multi_progress = MultiProgress::new();
    let overall_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to build worker pool")?;

    // Process files in parallel
    pool.install(|| {
        files.par_iter().for_each(|file_path| {
            match process_file(file_path, output_dir, language, encoding, &encoder) {
                Ok(_) => {
                    success_count.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    error_count.fetch_add(1, Ordering::Relaxed);
                    tracing::error!("Failed to convert {}: {:#}", file_path.display(), e);
                }
            }

            overall_pb.inc(1);
        });
    });

    overall_pb.finish();

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    println!("\nBatch conversion complete:");
    println!("  Success: {}", success);
    println!("  Errors:  {}", errors);

    if errors > 0 {
        bail!("Batch conversion completed with {} errors", errors);
    }

    Ok(())
}

fn process_file(
    input_path: &Path,
    output_dir: &Path,
    language: Language,
    encoding: &EncodingChoice,
    encoder: &dyn Encoder,
) -> Result<()> {
    let title = super::convert::default_title(input_path)
        .context("Could not determine output filename from input")?;

    // Read and decode
    let buffer = fs::read(input_path)?;
    let decoder = TxtDecoder::new()
        .with_meta(BookMeta::new(title.clone(), language))
        .with_encoding(encoding.clone());
    let (book, read) = decoder.decode_bytes(&buffer);

    // Build output path
    let output_file = output_dir.join(format!("{}.{}", title, encoder.file_extension()));

    // Encode
    encode_to_path(encoder, &book, &output_file)?;

    tracing::info!(
        "Converted {} ({}, {} chapters) -> {}",
        input_path.display(),
        read.used_encoding,
        book.chapters.len(),
        output_file.display()
    );

    Ok(())
}
