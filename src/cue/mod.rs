use crate::cue::encoding::{decode, encode};
use crate::cue::error::CueResult;
use crate::cue::lines::DEFAULT_DELIMITERS;
use crate::cue::parser::CueParser;
use encoding_rs::Encoding;
use log::debug;
use std::path::Path;

pub mod encoding;
pub mod error;
pub mod lines;
pub mod models;
pub mod parser;
pub mod writer;

pub use models::{AudioFile, CueSheet, DataType, FileType, Flag, Index, Track};
pub use writer::LineEnding;

/// How [`CueSheet::save`] encodes the written file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveOptions {
    /// Target encoding, UTF-8 when unset.
    pub encoding: Option<&'static Encoding>,
    pub line_ending: LineEnding,
}

impl CueSheet {
    /// Parses cue sheet text split into lines at `\n`.
    pub fn parse(text: &str) -> CueResult<CueSheet> {
        Self::parse_with_delimiters(text, DEFAULT_DELIMITERS)
    }

    /// Parses cue sheet text split into lines at any of `delimiters`.
    pub fn parse_with_delimiters(text: &str, delimiters: &[char]) -> CueResult<CueSheet> {
        CueParser::new(text, delimiters).parse()
    }

    /// Reads and parses a cue sheet file, decoding it as UTF-8 unless another encoding is given.
    pub async fn open(
        path: impl AsRef<Path>,
        encoding: Option<&'static Encoding>,
    ) -> CueResult<CueSheet> {
        let path = path.as_ref();
        debug!("Parsing CUE file: {path:?}");

        let data = tokio::fs::read(path).await?;
        let text = decode(&data, encoding);

        Self::parse(&text)
    }

    /// Writes the canonical rendering of the sheet, followed by one line ending.
    pub async fn save(&self, path: impl AsRef<Path>, options: SaveOptions) -> CueResult<()> {
        let path = path.as_ref();
        debug!("Writing CUE file: {path:?}");

        let mut text = self.to_cue_string(options.line_ending);
        text.push_str(options.line_ending.as_str());

        tokio::fs::write(path, encode(&text, options.encoding)).await?;
        Ok(())
    }
}
