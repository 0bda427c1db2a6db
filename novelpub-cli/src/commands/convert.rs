//! Convert command implementation

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use novelpub_core::decoder::{read_text_file, EncodingChoice, TxtDecoder};
use novelpub_core::encoder::{encode_to_path, Encoder, EpubEncoder, ParagraphPolicy};
use novelpub_core::{edit, BookMeta, Chapter, ChapterId, Cover, Language};
use std::path::Path;
use std::time::Duration;

/// Options for a single conversion
pub struct ConvertOptions {
    pub title: Option<String>,
    pub author: String,
    pub language: Language,
    pub encoding: EncodingChoice,
    pub cover: Option<std::path::PathBuf>,
    pub merge_paragraphs: bool,
    /// `POSITION=TITLE` rename requests
    pub renames: Vec<String>,
    /// Positions to merge into their predecessor
    pub merges: Vec<usize>,
}

/// Convert a text novel to EPUB
pub async fn convert(input: &Path, output: &Path, options: ConvertOptions) -> Result<()> {
    // Set up progress bar with animation
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    // Read input file
    pb.set_message("Reading input file...");
    let read = read_text_file(input, &options.encoding)
        .await
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    tracing::info!(
        "Read {} (detected {}, decoded as {})",
        input.display(),
        read.detected_encoding,
        read.used_encoding
    );

    let title = options
        .title
        .clone()
        .or_else(|| default_title(input))
        .unwrap_or_default();
    let meta = BookMeta::new(title, options.language).with_author(options.author.clone());

    let mut decoder = TxtDecoder::new().with_meta(meta);
    if let Some(cover_path) = &options.cover {
        let cover = Cover::from_path(cover_path)
            .with_context(|| format!("Failed to load cover image: {}", cover_path.display()))?;
        decoder = decoder.with_cover(cover);
    }

    // Segment
    pb.set_message("Splitting chapters...");
    let mut book = decoder.decode_text(&read.text);
    book.chapters = apply_edits(book.chapters, &options.renames, &options.merges)?;

    tracing::info!("Parsed '{}' into {} chapters", book.title(), book.chapters.len());

    // Encode
    let policy = if options.merge_paragraphs {
        ParagraphPolicy::MergeRuns
    } else {
        ParagraphPolicy::PerLine
    };
    let encoder = EpubEncoder::new().with_paragraph_policy(policy);

    pb.set_message(format!("Encoding to {}...", encoder.format_name()));
    encode_to_path(&encoder, &book, output)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    pb.finish_with_message(format!(
        "Converted '{}' ({} chapters) -> {}",
        book.title(),
        book.chapters.len(),
        output.display()
    ));

    Ok(())
}

/// Book title derived from the input file name
pub(crate) fn default_title(input: &Path) -> Option<String> {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

/// Apply rename and merge requests given as 1-based positions.
///
/// Positions refer to the chapter list as parsed; they are resolved to ids
/// before any edit runs. Renames apply first, then merges in order.
fn apply_edits(chapters: Vec<Chapter>, renames: &[String], merges: &[usize]) -> Result<Vec<Chapter>> {
    let rename_targets = renames
        .iter()
        .map(|request| {
            let (position, title) = parse_rename(request)?;
            Ok((chapter_id_at(&chapters, position)?, title))
        })
        .collect::<Result<Vec<_>>>()?;

    let merge_targets = merges
        .iter()
        .map(|&position| chapter_id_at(&chapters, position))
        .collect::<Result<Vec<_>>>()?;

    let mut chapters = chapters;
    for (id, title) in rename_targets {
        chapters = edit::rename(&chapters, &id, title);
    }
    for id in merge_targets {
        chapters = edit::merge_with_previous(&chapters, &id);
    }

    Ok(chapters)
}

fn chapter_id_at(chapters: &[Chapter], position: usize) -> Result<ChapterId> {
    position
        .checked_sub(1)
        .and_then(|index| chapters.get(index))
        .map(|chapter| chapter.id.clone())
        .with_context(|| {
            format!(
                "Chapter position {} is out of range (1-{})",
                position,
                chapters.len()
            )
        })
}

fn parse_rename(request: &str) -> Result<(usize, String)> {
    let Some((position, title)) = request.split_once('=') else {
        bail!("Invalid rename '{}', expected POSITION=TITLE", request);
    };
    let position: usize = position
        .trim()
        .parse()
        .with_context(|| format!("Invalid chapter position in '{}'", request))?;
    let title = title.trim();
    if title.is_empty() {
        bail!("Empty title in rename '{}'", request);
    }
    Ok((position, title.to_string()))
}
