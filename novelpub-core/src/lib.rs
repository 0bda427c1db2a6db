//! novelpub core library
//!
//! Turns plain-text novel manuscripts into EPUB books. Raw bytes are decoded
//! with best-effort encoding detection, split into trimmed lines, segmented
//! into chapters by their heading lines, optionally corrected with the
//! [`edit`] functions, and finally serialized by an [`encoder::Encoder`].

pub mod decoder;
pub mod edit;
pub mod encoder;
pub mod error;
pub mod types;

pub use error::{ConversionError, NovelpubError, ParseError, Result};
pub use types::{Book, BookMeta, Chapter, ChapterId, Cover, Language, ReadResult};
