//! Book metadata supplied by the caller

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Book language, which also selects the locale-specific default titles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Language {
    /// Simplified Chinese
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,

    /// English
    #[serde(rename = "en")]
    En,
}

impl Language {
    /// Language code written into the package metadata and `xml:lang`
    pub fn code(self) -> &'static str {
        match self {
            Language::ZhCn => "zh-CN",
            Language::En => "en",
        }
    }

    /// Title of the single chapter produced when no headings are found
    pub fn body_title(self) -> &'static str {
        match self {
            Language::ZhCn => "正文",
            Language::En => "Content",
        }
    }

    /// Title of the front-matter chapter
    pub fn intro_title(self) -> &'static str {
        match self {
            Language::ZhCn => "简介",
            Language::En => "Introduction",
        }
    }

    /// Heading of the navigation document
    pub fn toc_title(self) -> &'static str {
        match self {
            Language::ZhCn => "目录",
            Language::En => "Contents",
        }
    }

    /// Fallback book title
    pub fn untitled(self) -> &'static str {
        match self {
            Language::ZhCn => "未命名",
            Language::En => "Untitled",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh-cn" | "zh" | "zh_cn" => Ok(Language::ZhCn),
            "en" => Ok(Language::En),
            _ => Err(ParseError::InvalidLanguage(s.to_string())),
        }
    }
}

/// Book metadata consumed by the segmenter and the encoder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookMeta {
    /// Book title
    pub title: String,

    /// Author name, may be empty
    pub author: String,

    /// Book language
    pub language: Language,
}

impl BookMeta {
    /// Create new metadata with required fields
    pub fn new(title: impl Into<String>, language: Language) -> Self {
        Self {
            title: title.into(),
            author: String::new(),
            language,
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Title to publish, falling back to the language's untitled label
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            self.language.untitled()
        } else {
            title
        }
    }
}
