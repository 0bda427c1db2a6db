//! Chapter segmentation of normalized manuscript lines

use super::normalize::{has_meaningful_content, trim_line};
use crate::types::{Chapter, ChapterId, Language};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// `第十二章 标题`, `第12章：标题`, `第〇章`
static CHINESE_NUMERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^第([0-9０-９零一二三四五六七八九十百千万两〇○]+)章(?:[\s·、，,：:.-]*)(.*)$")
        .expect("chinese heading pattern is valid")
});

/// `Chapter 3`, `1. Chapter 3 Title`, `Chapter 3--4 Title`
static LATIN_CHAPTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:[0-9０-９]+[.．、]?\s*)?(chapter\s*[0-9０-９]+(?:\s*[-－‐‑–—―~～]{2,}\s*[0-9０-９]+)?.*)$",
    )
    .expect("latin heading pattern is valid")
});

/// A recognized textual form of a chapter title line.
///
/// Dialects are tried in the order of [`HeadingDialect::ALL`]; the first one
/// that matches a line decides its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingDialect {
    /// `第N章` with Arabic, full-width or Chinese numerals. The title is the
    /// whole heading.
    ChineseNumeral,

    /// `Chapter N` with an optional numeric prefix and range suffix. The title
    /// starts at the word "Chapter".
    LatinChapter,
}

impl HeadingDialect {
    /// All dialects in priority order
    pub const ALL: [HeadingDialect; 2] = [HeadingDialect::ChineseNumeral, HeadingDialect::LatinChapter];

    fn pattern(self) -> &'static Regex {
        match self {
            HeadingDialect::ChineseNumeral => &CHINESE_NUMERAL,
            HeadingDialect::LatinChapter => &LATIN_CHAPTER,
        }
    }

    /// Extract the chapter title if the trimmed line is a heading in this dialect
    pub fn extract_title(self, line: &str) -> Option<String> {
        let captures = self.pattern().captures(trim_line(line))?;
        let title = match self {
            HeadingDialect::ChineseNumeral => captures.get(0),
            HeadingDialect::LatinChapter => captures.get(1),
        }?;
        Some(title.as_str().to_string())
    }
}

/// Title of the line if any dialect recognizes it as a heading
pub fn match_heading(line: &str) -> Option<String> {
    HeadingDialect::ALL
        .iter()
        .find_map(|dialect| dialect.extract_title(line))
}

/// A heading line found during the scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeadingMatch {
    pub line_index: usize,
    pub title: String,
}

/// Scan the lines once, in order, recording every heading
pub(crate) fn detect_headings(lines: &[String]) -> Vec<HeadingMatch> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(line_index, line)| {
            match_heading(line).map(|title| HeadingMatch { line_index, title })
        })
        .collect()
}

/// Source of chapter identifiers.
///
/// Ids only need to be unique within one parse session.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> ChapterId;
}

/// Random UUID v4 identifiers
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> ChapterId {
        ChapterId::new(uuid::Uuid::new_v4().to_string())
    }
}

/// Monotonic `{prefix}-{n}` identifiers, starting at 1
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("chapter")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> ChapterId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        ChapterId::new(format!("{}-{}", self.prefix, n))
    }
}

/// Splits normalized lines into chapters
#[derive(Clone)]
pub struct ChapterSegmenter {
    language: Language,
    ids: Arc<dyn IdGenerator>,
}

impl ChapterSegmenter {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ids: Arc::new(UuidIdGenerator),
        }
    }

    /// Use a different identifier source
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Partition lines into chapters.
    ///
    /// Without any heading the whole text becomes one chapter with the
    /// language's body title. Otherwise meaningful front matter becomes an
    /// intro chapter, followed by one chapter per heading holding the lines up
    /// to the next heading. Heading lines themselves only survive as titles.
    pub fn segment(&self, lines: &[String]) -> Vec<Chapter> {
        let headings = detect_headings(lines);

        let Some(first) = headings.first() else {
            tracing::debug!("No chapter headings found in {} lines", lines.len());
            return vec![Chapter::new(
                self.ids.next_id(),
                self.language.body_title(),
                lines.to_vec(),
            )];
        };

        let mut chapters = Vec::with_capacity(headings.len() + 1);

        let front_matter = &lines[..first.line_index];
        if has_meaningful_content(front_matter) {
            chapters.push(
                Chapter::new(
                    self.ids.next_id(),
                    self.language.intro_title(),
                    front_matter.to_vec(),
                )
                .into_intro(),
            );
        }

        for (i, heading) in headings.iter().enumerate() {
            let end = headings
                .get(i + 1)
                .map(|next| next.line_index)
                .unwrap_or(lines.len());
            let body = lines[heading.line_index + 1..end].to_vec();
            chapters.push(Chapter::new(self.ids.next_id(), heading.title.clone(), body));
        }

        tracing::debug!(
            headings = headings.len(),
            intro = chapters.first().is_some_and(|c| c.is_intro),
            "Segmented text into {} chapters",
            chapters.len()
        );

        chapters
    }
}

/// Segment lines with random chapter ids
pub fn segment(lines: &[String], language: Language) -> Vec<Chapter> {
    ChapterSegmenter::new(language).segment(lines)
}
