//! Error types for novelpub core
//!
//! Encoding resolution, segmentation and chapter edits never fail; errors only
//! come from the collaborators around them (file I/O, EPUB generation).

use thiserror::Error;

/// Result type alias using NovelpubError
pub type Result<T> = std::result::Result<T, NovelpubError>;

/// Top-level error type for all novelpub operations
#[derive(Debug, Error)]
pub enum NovelpubError {
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while reading input
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid language: {0} (expected zh-CN or en)")]
    InvalidLanguage(String),

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur during encoding
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
}
