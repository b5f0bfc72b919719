use crate::cue::error::{CueError, CueResult};
use encoding_rs::{Encoding, UTF_8};
use log::warn;
use std::borrow::Cow;

/// Resolves a WHATWG encoding label such as `utf-8`, `shift_jis` or `windows-1252`.
pub fn encoding_for_label(label: &str) -> CueResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| CueError::UnknownEncoding(label.to_string()))
}

/// Decodes raw bytes, defaulting to UTF-8. A byte order mark overrides the requested encoding.
pub(crate) fn decode<'a>(bytes: &'a [u8], encoding: Option<&'static Encoding>) -> Cow<'a, str> {
    let encoding = encoding.unwrap_or(UTF_8);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(
            "Input is not valid {}, malformed sequences were replaced",
            used.name()
        );
    }
    text
}

/// Encodes text for writing. UTF-16 encodings fall back to UTF-8 output.
pub(crate) fn encode<'a>(text: &'a str, encoding: Option<&'static Encoding>) -> Cow<'a, [u8]> {
    let encoding = encoding.unwrap_or(UTF_8);
    let (bytes, used, had_errors) = encoding.encode(text);
    if used != encoding {
        warn!(
            "Cannot write {}, writing {} instead",
            encoding.name(),
            used.name()
        );
    }
    if had_errors {
        warn!(
            "Some characters cannot be represented in {}, they were written as HTML entities",
            used.name()
        );
    }
    bytes
}
