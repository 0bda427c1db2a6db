//! The Book type handed from the text decoder to the encoder

use super::{BookMeta, Chapter, Cover};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A parsed novel ready for serialization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Unique identifier for this book
    pub id: Uuid,

    /// Book metadata (title, author, language)
    pub metadata: BookMeta,

    /// Ordered list of chapters
    pub chapters: Vec<Chapter>,

    /// Optional cover image
    pub cover: Option<Cover>,
}

impl Book {
    /// Create a book with existing metadata and chapters
    pub fn new(metadata: BookMeta, chapters: Vec<Chapter>) -> Self {
        Self {
            id: Uuid::new_v4(),
            metadata,
            chapters,
            cover: None,
        }
    }

    /// Attach a cover image
    pub fn with_cover(mut self, cover: Cover) -> Self {
        self.cover = Some(cover);
        self
    }

    /// Get the book title
    pub fn title(&self) -> &str {
        self.metadata.display_title()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChapterId, Language};

    #[test]
    fn test_book_creation() {
        let chapter = Chapter::new(ChapterId::from("c1"), "第1章 开始", vec!["内容".to_string()]);
        let book = Book::new(BookMeta::new("测试小说", Language::ZhCn), vec![chapter]);

        assert_eq!(book.title(), "测试小说");
        assert_eq!(book.chapters.len(), 1);
        assert!(book.cover.is_none());
    }

    #[test]
    fn test_book_serialization() {
        let book = Book::new(BookMeta::new("Serialization Test", Language::En), Vec::new());
        let json = serde_json::to_string(&book).unwrap();
        let deserialized: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(book, deserialized);
    }
}
