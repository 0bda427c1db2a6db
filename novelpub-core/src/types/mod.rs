//! Core value types shared by the decoding pipeline and the EPUB encoder

mod book;
mod chapter;
mod cover;
mod metadata;
mod read_result;

pub use book::Book;
pub use chapter::{Chapter, ChapterId};
pub use cover::Cover;
pub use metadata::{BookMeta, Language};
pub use read_result::ReadResult;
