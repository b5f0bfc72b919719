use crate::cue::models::{CueSheet, Index, Track};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Renders a [`CueSheet`] in canonical cue sheet syntax.
///
/// Global lines each end with a line ending, tracks are separated by a blank
/// line and the last track has no trailing line ending.
pub struct CueFormatter<'a> {
    cue_sheet: &'a CueSheet,
    line_ending: LineEnding,
}

impl CueSheet {
    pub fn display(&self, line_ending: LineEnding) -> CueFormatter<'_> {
        CueFormatter {
            cue_sheet: self,
            line_ending,
        }
    }

    pub fn to_cue_string(&self, line_ending: LineEnding) -> String {
        self.display(line_ending).to_string()
    }
}

impl fmt::Display for CueSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(LineEnding::default()), f)
    }
}

/// `mm:ss:ff`, each component zero-padded to two digits.
impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.minutes(),
            self.seconds(),
            self.frames()
        )
    }
}

impl fmt::Display for CueFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let eol = self.line_ending.as_str();
        let sheet = self.cue_sheet;

        for comment in sheet.comments() {
            write!(f, "REM {comment}{eol}")?;
        }

        if !sheet.catalog().trim().is_empty() {
            write!(f, "CATALOG {}{eol}", sheet.catalog())?;
        }
        if !sheet.performer().trim().is_empty() {
            write!(f, "PERFORMER \"{}\"{eol}", sheet.performer())?;
        }
        if !sheet.songwriter().trim().is_empty() {
            write!(f, "SONGWRITER \"{}\"{eol}", sheet.songwriter())?;
        }
        if !sheet.title().trim().is_empty() {
            write!(f, "TITLE \"{}\"{eol}", sheet.title())?;
        }
        if !sheet.cd_text_file().trim().is_empty() {
            write!(f, "CDTEXTFILE \"{}\"{eol}", sheet.cd_text_file().trim())?;
        }

        for (i, track) in sheet.tracks().iter().enumerate() {
            if i > 0 {
                write!(f, "{eol}{eol}")?;
            }
            write_track(f, track, eol)?;
        }

        Ok(())
    }
}

fn write_track(f: &mut fmt::Formatter<'_>, track: &Track, eol: &str) -> fmt::Result {
    if let Some(file) = track.data_file() {
        let filename = file.filename.trim();
        if !filename.is_empty() {
            write!(f, "FILE \"{filename}\" {}{eol}", file.file_type)?;
        }
    }

    write!(f, "  TRACK {:02} {}", track.number(), track.data_type())?;

    for comment in track.comments() {
        write!(f, "{eol}    REM {comment}")?;
    }

    if !track.performer().trim().is_empty() {
        write!(f, "{eol}    PERFORMER \"{}\"", track.performer())?;
    }
    if !track.songwriter().trim().is_empty() {
        write!(f, "{eol}    SONGWRITER \"{}\"", track.songwriter())?;
    }
    if !track.title().trim().is_empty() {
        write!(f, "{eol}    TITLE \"{}\"", track.title())?;
    }

    if !track.flags().is_empty() {
        write!(f, "{eol}    FLAGS")?;
        for flag in track.flags() {
            write!(f, " {flag}")?;
        }
    }

    if !track.isrc().trim().is_empty() {
        write!(f, "{eol}    ISRC {}", track.isrc().trim())?;
    }

    if let Some(pregap) = track.pregap() {
        write!(f, "{eol}    PREGAP {pregap}")?;
    }

    for index in track.indices() {
        write!(f, "{eol}    INDEX {:02} {index}", index.number())?;
    }

    if let Some(postgap) = track.postgap() {
        write!(f, "{eol}    POSTGAP {postgap}")?;
    }

    Ok(())
}
