//! Encoders for converting a parsed book to output formats

mod epub;

pub use epub::{EpubEncoder, ParagraphPolicy};

use crate::error::{ConversionError, Result};
use crate::types::Book;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Trait for encoding books to output formats
pub trait Encoder: Send + Sync {
    /// Encode a book to a writer
    fn encode(&self, book: &Book, writer: &mut dyn Write) -> std::result::Result<(), ConversionError>;

    /// Format name (e.g., "EPUB")
    fn format_name(&self) -> &str;

    /// File extension for this format
    fn file_extension(&self) -> &str;
}

/// Get an encoder by format name
pub fn encoder_for_format(format: &str) -> Option<Box<dyn Encoder>> {
    match format.to_lowercase().as_str() {
        "epub" | "epub3" => Some(Box::new(EpubEncoder::new())),
        _ => None,
    }
}

/// Encode a book into a newly created file at `path`
pub fn encode_to_path(encoder: &dyn Encoder, book: &Book, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    encoder.encode(book, &mut writer)?;
    writer.flush()?;
    Ok(())
}
