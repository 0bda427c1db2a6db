//! EPUB encoder implementation

use crate::decoder::trim_line;
use crate::error::ConversionError;
use crate::types::{Book, Chapter, Language};
use std::io::Write;

const STYLESHEET: &str = "h1 { text-align: center; margin: 1em 0; }\np { text-indent: 2em; margin: 0.4em 0; }\n";

/// How chapter lines become paragraphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphPolicy {
    /// Every non-blank line is its own paragraph
    #[default]
    PerLine,

    /// Consecutive non-blank lines join into one paragraph; blank lines separate
    MergeRuns,
}

/// Encoder for EPUB 3 format
pub struct EpubEncoder {
    paragraphs: ParagraphPolicy,
}

impl EpubEncoder {
    pub fn new() -> Self {
        Self {
            paragraphs: ParagraphPolicy::PerLine,
        }
    }

    /// Set the paragraph policy
    pub fn with_paragraph_policy(mut self, paragraphs: ParagraphPolicy) -> Self {
        self.paragraphs = paragraphs;
        self
    }

    /// Group chapter lines into paragraph texts
    fn paragraphs(&self, chapter: &Chapter) -> Vec<String> {
        match self.paragraphs {
            ParagraphPolicy::PerLine => chapter.non_blank_lines().map(str::to_string).collect(),
            ParagraphPolicy::MergeRuns => {
                let mut paragraphs = Vec::new();
                let mut run: Vec<&str> = Vec::new();
                for line in &chapter.lines {
                    let line = trim_line(line);
                    if line.is_empty() {
                        if !run.is_empty() {
                            paragraphs.push(run.join(" "));
                            run.clear();
                        }
                    } else {
                        run.push(line);
                    }
                }
                if !run.is_empty() {
                    paragraphs.push(run.join(" "));
                }
                paragraphs
            }
        }
    }

    /// Generate XHTML document for a chapter
    fn chapter_to_xhtml(&self, chapter: &Chapter, language: Language, index: usize) -> String {
        let body: String = self
            .paragraphs(chapter)
            .iter()
            .map(|p| format!("    <p>{}</p>\n", escape_html(p)))
            .collect();

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" xml:lang="{lang}" lang="{lang}">
<head>
  <title>{title}</title>
  <meta charset="UTF-8"/>
  <link rel="stylesheet" type="text/css" href="stylesheet.css"/>
</head>
<body>
  <section id="chap-{index}">
    <h1>{title}</h1>
{body}  </section>
</body>
</html>"#,
            lang = language.code(),
            title = escape_html(&chapter.title),
            index = index,
            body = body,
        )
    }
}

impl Default for EpubEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Encoder for EpubEncoder {
    fn encode(&self, book: &Book, writer: &mut dyn Write) -> Result<(), ConversionError> {
        use epub_builder::{EpubBuilder, EpubContent, EpubVersion, ReferenceType, ZipLibrary};

        let mut builder = EpubBuilder::new(ZipLibrary::new().map_err(|e| {
            ConversionError::EncodingFailed(format!("Failed to create zip: {}", e))
        })?).map_err(|e| {
            ConversionError::EncodingFailed(format!("Failed to create EPUB builder: {}", e))
        })?;
        builder.epub_version(EpubVersion::V30);

        let language = book.metadata.language;

        // Set metadata
        builder
            .metadata("title", book.title())
            .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;

        let author = book.metadata.author.trim();
        if !author.is_empty() {
            builder
                .metadata("author", author)
                .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;
        }

        builder
            .metadata("lang", language.code())
            .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;
        builder
            .metadata("toc_name", language.toc_title())
            .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;
        builder
            .stylesheet(STYLESHEET.as_bytes())
            .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;

        if let Some(cover) = &book.cover {
            if cover.data.is_empty() {
                return Err(ConversionError::ResourceNotFound(cover.file_name.clone()));
            }
            builder
                .add_cover_image(
                    format!("images/{}", cover.file_name),
                    cover.data.as_slice(),
                    &cover.mime_type,
                )
                .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;
        }

        // Add chapters
        for (i, chapter) in book.chapters.iter().enumerate() {
            let xhtml = self.chapter_to_xhtml(chapter, language, i + 1);
            let filename = format!("chapter_{}.xhtml", i + 1);

            builder
                .add_content(
                    EpubContent::new(&filename, xhtml.as_bytes())
                        .title(&chapter.title)
                        .reftype(ReferenceType::Text),
                )
                .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;
        }

        // Generate EPUB
        builder
            .generate(writer)
            .map_err(|e| ConversionError::EncodingFailed(e.to_string()))?;

        tracing::debug!(
            "Encoded '{}' with {} chapters as EPUB",
            book.title(),
            book.chapters.len()
        );

        Ok(())
    }

    fn format_name(&self) -> &str {
        "EPUB"
    }

    fn file_extension(&self) -> &str {
        "epub"
    }
}

/// Escape HTML special characters
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
