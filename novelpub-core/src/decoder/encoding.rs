//! Character encoding detection and decoding.
//!
//! Raw manuscript bytes are resolved to text in three steps:
//! - byte-order mark sniffing (UTF-8, UTF-16 LE/BE)
//! - UTF-8 validation
//! - chardetng statistical detection for legacy encodings (GBK, Big5, ...)
//!
//! Detection never fails. Unknown labels fall back to UTF-8 and malformed
//! byte sequences decode to U+FFFD.

use crate::error::Result;
use crate::types::ReadResult;
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Canonical label used whenever nothing better is known
pub const FALLBACK_ENCODING: &str = "utf-8";

/// Reported when detection produced no label
pub const UNKNOWN_ENCODING: &str = "unknown";

const BOM: char = '\u{FEFF}';

/// Synonyms collapsed to one canonical codec name
const ENCODING_ALIASES: &[(&str, &str)] = &[
    ("utf8", "utf-8"),
    ("utf-8", "utf-8"),
    ("gbk", "gb18030"),
    ("gb2312", "gb18030"),
    ("gb18030", "gb18030"),
    ("big5", "big5"),
    ("big-5", "big5"),
    ("shift_jis", "shift_jis"),
    ("sjis", "shift_jis"),
];

/// Which encoding to decode with
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EncodingChoice {
    /// Use the detected encoding
    #[default]
    Auto,

    /// Use the given label regardless of detection
    Explicit(String),
}

impl fmt::Display for EncodingChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingChoice::Auto => f.write_str("auto"),
            EncodingChoice::Explicit(label) => f.write_str(label),
        }
    }
}

impl FromStr for EncodingChoice {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("auto") {
            Ok(EncodingChoice::Auto)
        } else {
            Ok(EncodingChoice::Explicit(s.to_string()))
        }
    }
}

/// Collapse an encoding label to its canonical name.
pub fn normalize_label(label: &str) -> String {
    let key = label.trim().to_lowercase();
    ENCODING_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(key)
}

/// Guess the encoding of a byte buffer.
///
/// Returns `None` only for an empty buffer.
pub fn detect_label(buffer: &[u8]) -> Option<String> {
    if buffer.is_empty() {
        return None;
    }

    // BOMs are the most reliable indicator
    if let Some((encoding, _)) = Encoding::for_bom(buffer) {
        return Some(normalize_label(encoding.name()));
    }

    // ASCII is valid UTF-8 too
    if std::str::from_utf8(buffer).is_ok() {
        return Some(FALLBACK_ENCODING.to_string());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(buffer, true);
    let encoding = detector.guess(None, true);

    Some(normalize_label(encoding.name()))
}

/// Look up a codec for a canonical label, if the decoder supports it
fn codec_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label_no_replacement(label.as_bytes())
}

/// Decode a byte buffer to text.
///
/// With [`EncodingChoice::Auto`] the detected encoding is used; an explicit
/// choice overrides detection. Either way an unsupported label falls back to
/// UTF-8 and a single leading byte-order mark is removed.
pub fn resolve(buffer: &[u8], choice: &EncodingChoice) -> ReadResult {
    let detected = detect_label(buffer);

    let target = match choice {
        EncodingChoice::Auto => detected
            .clone()
            .unwrap_or_else(|| FALLBACK_ENCODING.to_string()),
        EncodingChoice::Explicit(label) => normalize_label(label),
    };

    let (codec, used) = match codec_for_label(&target) {
        Some(codec) => (codec, normalize_label(codec.name())),
        None => {
            tracing::debug!("Encoding '{}' is not supported, decoding as UTF-8", target);
            (UTF_8, FALLBACK_ENCODING.to_string())
        }
    };

    let (decoded, had_errors) = codec.decode_without_bom_handling(buffer);
    if had_errors {
        tracing::debug!("Replaced malformed {} sequences while decoding", used);
    }

    let text = match decoded.strip_prefix(BOM) {
        Some(stripped) => stripped.to_string(),
        None => decoded.into_owned(),
    };

    tracing::debug!(
        detected = detected.as_deref().unwrap_or(UNKNOWN_ENCODING),
        used = %used,
        "Resolved text encoding"
    );

    ReadResult {
        text,
        detected_encoding: detected.unwrap_or_else(|| UNKNOWN_ENCODING.to_string()),
        used_encoding: used,
    }
}

/// Read a whole text file and decode it.
///
/// I/O errors propagate; decoding itself never fails.
pub async fn read_text_file(path: impl AsRef<Path>, choice: &EncodingChoice) -> Result<ReadResult> {
    let buffer = tokio::fs::read(path.as_ref()).await?;
    Ok(resolve(&buffer, choice))
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{BIG5, GBK};

    const SAMPLE_ZH: &str = "第一章 开始\n这是一个关于测试的小说。我们希望编码检测能够正确识别简体中文文本，\
        并且在解码之后得到完全相同的内容。天色渐渐暗了下来，他推开门走进了院子。\n";

    fn gbk_bytes(text: &str) -> Vec<u8> {
        let (bytes, _, had_errors) = GBK.encode(text);
        assert!(!had_errors);
        bytes.into_owned()
    }

    #[test]
    fn test_alias_table() {
        assert_eq!(normalize_label("GBK"), "gb18030");
        assert_eq!(normalize_label("gb2312"), "gb18030");
        assert_eq!(normalize_label("UTF8"), "utf-8");
        assert_eq!(normalize_label("Big-5"), "big5");
        assert_eq!(normalize_label("SJIS"), "shift_jis");
        assert_eq!(normalize_label("windows-1252"), "windows-1252");
    }

    #[test]
    fn test_encoding_choice_parsing() {
        assert_eq!("auto".parse::<EncodingChoice>().unwrap(), EncodingChoice::Auto);
        assert_eq!("AUTO".parse::<EncodingChoice>().unwrap(), EncodingChoice::Auto);
        assert_eq!(
            "gbk".parse::<EncodingChoice>().unwrap(),
            EncodingChoice::Explicit("gbk".to_string())
        );
    }

    #[test]
    fn test_utf8_input() {
        let result = resolve("第1章 开始\n内容".as_bytes(), &EncodingChoice::Auto);
        assert_eq!(result.text, "第1章 开始\n内容");
        assert_eq!(result.detected_encoding, "utf-8");
        assert_eq!(result.used_encoding, "utf-8");
    }

    #[test]
    fn test_empty_input_is_unknown() {
        let result = resolve(&[], &EncodingChoice::Auto);
        assert_eq!(result.text, "");
        assert_eq!(result.detected_encoding, "unknown");
        assert_eq!(result.used_encoding, "utf-8");
    }

    #[test]
    fn test_strips_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("简介".as_bytes());

        let result = resolve(&bytes, &EncodingChoice::Auto);
        assert_eq!(result.text, "简介");
        assert_eq!(result.detected_encoding, "utf-8");
    }

    #[test]
    fn test_utf16le_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "你好".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }

        let result = resolve(&bytes, &EncodingChoice::Auto);
        assert_eq!(result.detected_encoding, "utf-16le");
        assert_eq!(result.used_encoding, "utf-16le");
        assert_eq!(result.text, "你好");
    }

    #[test]
    fn test_detects_gbk() {
        let bytes = gbk_bytes(&SAMPLE_ZH.repeat(4));

        let result = resolve(&bytes, &EncodingChoice::Auto);
        assert_eq!(result.detected_encoding, "gb18030");
        assert_eq!(result.used_encoding, "gb18030");
        assert_eq!(result.text, SAMPLE_ZH.repeat(4));
    }

    #[test]
    fn test_explicit_choice_overrides_detection() {
        let (bytes, _, _) = BIG5.encode("繁體中文");
        let result = resolve(&bytes, &EncodingChoice::Explicit("Big-5".to_string()));
        assert_eq!(result.used_encoding, "big5");
        assert_eq!(result.text, "繁體中文");
    }

    #[test]
    fn test_reports_codec_behind_label() {
        let result = resolve(b"caf\xe9", &EncodingChoice::Explicit("latin1".to_string()));
        assert_eq!(result.used_encoding, "windows-1252");
        assert_eq!(result.text, "café");
    }

    #[test]
    fn test_unsupported_encoding_falls_back_to_utf8() {
        let result = resolve(
            "plain text".as_bytes(),
            &EncodingChoice::Explicit("klingon-8".to_string()),
        );
        assert_eq!(result.used_encoding, "utf-8");
        assert_eq!(result.text, "plain text");
    }

    #[test]
    fn test_malformed_bytes_are_replaced() {
        let bytes = [b'a', 0xFF, b'b'];
        let result = resolve(&bytes, &EncodingChoice::Explicit("utf-8".to_string()));
        assert_eq!(result.text, "a\u{FFFD}b");
    }

    #[tokio::test]
    async fn test_read_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("novel.txt");
        std::fs::write(&path, gbk_bytes(&SAMPLE_ZH.repeat(4))).unwrap();

        let result = read_text_file(&path, &EncodingChoice::Auto).await.unwrap();
        assert!(result.text.starts_with("第一章 开始"));
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let result = read_text_file("/nonexistent/novel.txt", &EncodingChoice::Auto).await;
        assert!(result.is_err());
    }
}
