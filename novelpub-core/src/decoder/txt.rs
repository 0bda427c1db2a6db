//! Plain-text novel decoder

use super::encoding::{resolve, EncodingChoice};
use super::normalize::normalize;
use super::segment::{ChapterSegmenter, IdGenerator, UuidIdGenerator};
use crate::error::ParseError;
use crate::types::{Book, BookMeta, Cover, Language, ReadResult};
use std::io::Read;
use std::sync::Arc;

/// Decoder for plain-text manuscripts of unknown encoding
pub struct TxtDecoder {
    /// Metadata stamped on every decoded book
    meta: BookMeta,
    /// Encoding override, or auto-detection
    encoding: EncodingChoice,
    /// Cover passed through to the book
    cover: Option<Cover>,
    /// Chapter id source
    ids: Arc<dyn IdGenerator>,
}

impl TxtDecoder {
    pub fn new() -> Self {
        Self {
            meta: BookMeta::new("", Language::default()),
            encoding: EncodingChoice::Auto,
            cover: None,
            ids: Arc::new(UuidIdGenerator),
        }
    }

    /// Set the book metadata
    pub fn with_meta(mut self, meta: BookMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Set the encoding choice
    pub fn with_encoding(mut self, encoding: EncodingChoice) -> Self {
        self.encoding = encoding;
        self
    }

    /// Attach a cover image
    pub fn with_cover(mut self, cover: Cover) -> Self {
        self.cover = Some(cover);
        self
    }

    /// Use a different chapter id source
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Decode text that was already resolved from bytes
    pub fn decode_text(&self, text: &str) -> Book {
        let lines = normalize(text);
        let chapters = ChapterSegmenter::new(self.meta.language)
            .with_id_generator(Arc::clone(&self.ids))
            .segment(&lines);

        let book = Book::new(self.meta.clone(), chapters);
        match &self.cover {
            Some(cover) => book.with_cover(cover.clone()),
            None => book,
        }
    }

    /// Decode a raw byte buffer, also reporting how it was read
    pub fn decode_bytes(&self, buffer: &[u8]) -> (Book, ReadResult) {
        let read = resolve(buffer, &self.encoding);
        let book = self.decode_text(&read.text);
        (book, read)
    }
}

impl Default for TxtDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Decoder for TxtDecoder {
    fn decode(&self, reader: &mut dyn Read) -> Result<Book, ParseError> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;

        let (book, read) = self.decode_bytes(&buffer);
        tracing::debug!(
            "Decoded {} bytes as {} (detected {}) into {} chapters",
            buffer.len(),
            read.used_encoding,
            read.detected_encoding,
            book.chapters.len()
        );

        Ok(book)
    }
}
