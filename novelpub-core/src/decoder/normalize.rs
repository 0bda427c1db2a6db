//! Line normalization for raw decoded text

/// Split raw text into trimmed lines.
///
/// `\r\n` and bare `\r` count as line breaks. Leading whitespace (including
/// U+3000 full-width space) and trailing whitespace are stripped from every
/// line. Blank lines stay in place as empty strings since they mark paragraph
/// and section breaks. Stray byte-order marks at either end of a line are
/// stripped like whitespace. The result always has at least one entry.
pub fn normalize(raw: &str) -> Vec<String> {
    raw.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(|line| trim_line(line).to_string())
        .collect()
}

fn is_padding(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Strip whitespace and byte-order marks from both ends of a line
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(is_padding)
}

/// Whether any line has non-whitespace content
pub fn has_meaningful_content<S: AsRef<str>>(lines: &[S]) -> bool {
    lines.iter().any(|line| !trim_line(line.as_ref()).is_empty())
}
