//! Decoders turning raw manuscripts into a [`Book`]
//!
//! The plain-text pipeline is split into its stages so each can be used on
//! its own: [`encoding`] resolves bytes to text, [`normalize`] splits text into
//! lines, and [`segment`] cuts the lines into chapters.

pub mod encoding;
pub mod normalize;
pub mod segment;
mod txt;

pub use encoding::{read_text_file, resolve, EncodingChoice};
pub use normalize::{has_meaningful_content, normalize, trim_line};
pub use segment::{
    segment, ChapterSegmenter, HeadingDialect, IdGenerator, SequentialIdGenerator, UuidIdGenerator,
};
pub use txt::TxtDecoder;

use crate::error::ParseError;
use crate::types::Book;
use std::io::Read;

/// Trait for decoding input formats into a book
pub trait Decoder: Send + Sync {
    /// Decode a book from a reader
    fn decode(&self, reader: &mut dyn Read) -> Result<Book, ParseError>;
}

/// Get the appropriate decoder for a file extension
pub fn decoder_for_extension(ext: &str) -> Option<Box<dyn Decoder>> {
    match ext.to_lowercase().as_str() {
        "txt" | "text" => Some(Box::new(TxtDecoder::new())),
        _ => None,
    }
}
