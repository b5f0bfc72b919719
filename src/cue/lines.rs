/// Delimiters used when the caller does not pass any.
pub const DEFAULT_DELIMITERS: &[char] = &['\n'];

/// A trimmed, non-empty line of a cue sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based position of the line in the raw input.
    pub number: usize,
    pub text: &'a str,
}

/// Splits `text` on any of `delimiters`, trims every piece and drops the empty ones.
///
/// An empty delimiter set falls back to [`DEFAULT_DELIMITERS`].
pub fn split_lines<'a>(text: &'a str, delimiters: &[char]) -> Vec<Line<'a>> {
    let delimiters = if delimiters.is_empty() {
        DEFAULT_DELIMITERS
    } else {
        delimiters
    };

    text.split(|c: char| delimiters.contains(&c))
        .enumerate()
        .map(|(i, raw)| Line {
            number: i + 1,
            text: raw.trim(),
        })
        .filter(|line| !line.text.is_empty())
        .collect()
}

/// Splits a trimmed line at its first space into an upper-cased keyword and the raw rest.
///
/// Without a space the whole line is the keyword and the rest is empty.
pub fn split_keyword(line: &str) -> (String, &str) {
    match line.find(' ') {
        Some(pos) if pos > 0 => (line[..pos].to_uppercase(), &line[pos + 1..]),
        _ => (line.to_uppercase(), ""),
    }
}
