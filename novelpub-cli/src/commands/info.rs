//! Info command implementation

use anyhow::{Context, Result};
use novelpub_core::decoder::{read_text_file, EncodingChoice, TxtDecoder};
use novelpub_core::{BookMeta, Language};
use serde::Serialize;
use std::path::Path;

/// Book info output
#[derive(Serialize)]
struct BookInfo {
    title: String,
    language: Language,
    detected_encoding: String,
    used_encoding: String,
    chapters: Vec<ChapterInfo>,
}

/// One row of the chapter list
#[derive(Serialize)]
struct ChapterInfo {
    position: usize,
    title: String,
    lines: usize,
    is_intro: bool,
}

/// Display detected encoding and chapter list of a text novel
pub async fn info(input: &Path, language: Language, encoding: &EncodingChoice, json: bool) -> Result<()> {
    let read = read_text_file(input, encoding)
        .await
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let title = super::convert::default_title(input).unwrap_or_default();
    let book = TxtDecoder::new()
        .with_meta(BookMeta::new(title, language))
        .decode_text(&read.text);

    let info = BookInfo {
        title: book.title().to_string(),
        language,
        detected_encoding: read.detected_encoding,
        used_encoding: read.used_encoding,
        chapters: book
            .chapters
            .iter()
            .enumerate()
            .map(|(i, chapter)| ChapterInfo {
                position: i + 1,
                title: chapter.title.clone(),
                lines: chapter.lines.len(),
                is_intro: chapter.is_intro,
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Title:     {}", info.title);
        println!("Language:  {}", info.language);
        println!("Detected:  {}", info.detected_encoding);
        println!("Decoded:   {}", info.used_encoding);
        println!("Chapters:  {}", info.chapters.len());
        for chapter in &info.chapters {
            let marker = if chapter.is_intro { " (intro)" } else { "" };
            println!(
                "  {:>4}. {} [{} lines]{}",
                chapter.position, chapter.title, chapter.lines, marker
            );
        }
    }

    Ok(())
}
