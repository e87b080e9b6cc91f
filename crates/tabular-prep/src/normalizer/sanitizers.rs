//! Text sanitization functions for raw records.

/// Position of a line that has no delimiter, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingDelimiter {
    pub line: usize,
}

/// Drop the first field of every line, up to and including the first
/// delimiter. Line terminators are kept.
///
/// A line with no delimiter cannot be shifted safely, so it is reported
/// instead of being passed through or skipped.
pub fn remove_first_field(text: &str, delimiter: char) -> Result<String, MissingDelimiter> {
    let mut stripped = String::with_capacity(text.len());

    for (idx, line) in text.split_inclusive('\n').enumerate() {
        match line.find(delimiter) {
            Some(pos) => stripped.push_str(&line[pos + delimiter.len_utf8()..]),
            None => return Err(MissingDelimiter { line: idx + 1 }),
        }
    }

    Ok(stripped)
}

/// Remove every occurrence of each character in `characters`.
pub fn remove_characters(text: &str, characters: &[char]) -> String {
    text.chars().filter(|c| !characters.contains(c)).collect()
}

/// Prefix `text` with a header line.
pub fn with_header(header_line: &str, text: &str) -> String {
    let mut out = String::with_capacity(header_line.len() + 1 + text.len());
    out.push_str(header_line);
    out.push('\n');
    out.push_str(text);
    out
}
