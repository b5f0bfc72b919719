//! Parsing, editing and writing of CUE sheets.
//!
//! ```no_run
//! use cuesheet::cue::CueSheet;
//!
//! let sheet = CueSheet::parse("FILE \"a.wav\" WAVE\nTRACK 01 AUDIO\nINDEX 01 00:00:00")?;
//! assert_eq!(sheet.tracks()[0].number(), 1);
//! println!("{sheet}");
//! # Ok::<(), cuesheet::cue::error::CueError>(())
//! ```

pub mod cue;
