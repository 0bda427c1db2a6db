//! Chapter type representing a single titled section of a novel

use crate::decoder::trim_line;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque chapter identifier, unique within one parse result
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterId(String);

impl ChapterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChapterId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single chapter of a book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chapter {
    /// Chapter ID, stable under rename
    pub id: ChapterId,

    /// Chapter title
    pub title: String,

    /// Body lines, one per source line, blank lines preserved
    pub lines: Vec<String>,

    /// Whether this chapter holds the front matter before the first heading
    #[serde(default)]
    pub is_intro: bool,
}

impl Chapter {
    /// Create a new chapter with a title and body
    pub fn new(id: ChapterId, title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            id,
            title: title.into(),
            lines,
            is_intro: false,
        }
    }

    /// Mark the chapter as front matter
    pub fn into_intro(mut self) -> Self {
        self.is_intro = true;
        self
    }

    /// Body lines that carry text
    pub fn non_blank_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .map(|line| trim_line(line))
            .filter(|line| !line.is_empty())
    }
}
