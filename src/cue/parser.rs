use crate::cue::error::{CueResult, FieldError, FieldResult};
use crate::cue::lines::{Line, split_keyword, split_lines};
use crate::cue::models::{AudioFile, CueSheet, DataType, FileType, Index, Track};
use log::{debug, trace, warn};

/// Single pass parser turning normalized cue sheet lines into a [`CueSheet`].
pub struct CueParser<'a> {
    lines: Vec<Line<'a>>,
    cue_sheet: CueSheet,
    /// Position of the track statements currently apply to, `None` while still global.
    current_track: Option<usize>,
    /// FILE statement waiting for the next TRACK.
    pending_file: Option<AudioFile>,
}

impl<'a> CueParser<'a> {
    pub fn new(text: &'a str, delimiters: &[char]) -> Self {
        Self {
            lines: split_lines(text, delimiters),
            cue_sheet: CueSheet::new(),
            current_track: None,
            pending_file: None,
        }
    }

    pub fn parse(mut self) -> CueResult<CueSheet> {
        let lines = std::mem::take(&mut self.lines);

        for line in &lines {
            self.parse_line(line)
                .map_err(|e| e.at(line.number, line.text))?;
        }

        if let Some(file) = self.pending_file.take() {
            debug!(
                "Discarding FILE {:?} that is not followed by a TRACK",
                file.filename
            );
        }

        Ok(self.cue_sheet)
    }

    fn parse_line(&mut self, line: &Line<'a>) -> FieldResult<()> {
        let (keyword, rest) = split_keyword(line.text);
        trace!("Line {}: {keyword}", line.number);

        match keyword.as_str() {
            "CATALOG" => {
                let value = strip_quotes(rest)?;
                if self.current_track.is_none() {
                    self.cue_sheet.set_catalog(value);
                }
            }
            "CDTEXTFILE" => {
                let value = strip_quotes(rest)?;
                if self.current_track.is_none() {
                    self.cue_sheet.set_cd_text_file(value);
                }
            }
            "FILE" => {
                self.pending_file = Some(parse_file(rest)?);
            }
            "FLAGS" => {
                if let Some(track) = self.track_mut() {
                    for token in rest.split_whitespace() {
                        track.add_flag_token(token);
                    }
                }
            }
            "INDEX" => {
                let index = parse_index(rest)?;
                match self.track_mut() {
                    Some(track) => track.push_index(index),
                    None => warn!("Ignoring INDEX before any TRACK on line {}", line.number),
                }
            }
            "ISRC" => {
                let value = strip_quotes(rest)?;
                if let Some(track) = self.track_mut() {
                    track.set_isrc(value);
                }
            }
            "PERFORMER" => {
                let value = strip_quotes(rest)?;
                match self.track_mut() {
                    Some(track) => track.set_performer(value),
                    None => self.cue_sheet.set_performer(value),
                }
            }
            "PREGAP" | "POSTGAP" => {
                let (minutes, seconds, frames) = parse_timecode(rest)?;
                let gap = Index::gap(minutes, seconds, frames);
                match self.track_mut() {
                    Some(track) if keyword == "PREGAP" => track.set_pregap(Some(gap)),
                    Some(track) => track.set_postgap(Some(gap)),
                    None => warn!("Ignoring {keyword} before any TRACK on line {}", line.number),
                }
            }
            "REM" => match self.track_mut() {
                Some(track) => track.add_comment(rest),
                None => self.cue_sheet.add_comment(rest),
            },
            "SONGWRITER" => {
                let value = strip_quotes(rest)?;
                match self.track_mut() {
                    Some(track) => track.set_songwriter(value),
                    None => self.cue_sheet.set_songwriter(value),
                }
            }
            "TITLE" => {
                let value = strip_quotes(rest)?;
                match self.track_mut() {
                    Some(track) => track.set_title(value),
                    None => self.cue_sheet.set_title(value),
                }
            }
            "TRACK" => {
                let mut track = parse_track(rest)?;
                let pending = self.pending_file.take();
                if let Some(file) = pending.filter(|f| !f.filename.trim().is_empty()) {
                    debug!(
                        "Associating FILE {:?} with track {}",
                        file.filename,
                        track.number()
                    );
                    track.set_data_file(Some(file));
                }
                self.cue_sheet.add_track(track);
                self.current_track = Some(self.cue_sheet.tracks().len() - 1);
            }
            _ => {
                debug!("Keeping unrecognized line {}: {}", line.number, line.text);
                match self.track_mut() {
                    Some(track) => track.add_garbage(line.text),
                    None => self.cue_sheet.add_garbage(line.text),
                }
            }
        }

        Ok(())
    }

    fn track_mut(&mut self) -> Option<&mut Track> {
        let position = self.current_track?;
        self.cue_sheet.track_mut(position)
    }
}

/// Removes the surrounding quotes of a value that starts with `"`.
///
/// The closing quote is the last `"` in the value, so `"a"b"` yields `a"b`.
pub(crate) fn strip_quotes(value: &str) -> FieldResult<&str> {
    if !value.starts_with('"') {
        return Ok(value);
    }

    match value.rfind('"') {
        Some(end) if end > 0 => Ok(&value[1..end]),
        _ => Err(FieldError::UnbalancedQuote),
    }
}

pub(crate) fn parse_int(value: &str) -> FieldResult<i32> {
    let value = value.trim();
    value
        .parse::<i32>()
        .map_err(|_| FieldError::Integer(value.to_string()))
}

/// Parses `mm:ss:ff`, splitting at the first and last colon.
pub(crate) fn parse_timecode(value: &str) -> FieldResult<(i32, i32, i32)> {
    let value = value.trim();
    let malformed = || FieldError::Timecode(value.to_string());

    let first = value.find(':').ok_or_else(malformed)?;
    let last = value.rfind(':').ok_or_else(malformed)?;
    if first == last {
        return Err(malformed());
    }

    let component = |s: &str| s.trim().parse::<i32>().map_err(|_| malformed());

    Ok((
        component(&value[..first])?,
        component(&value[first + 1..last])?,
        component(&value[last + 1..])?,
    ))
}

/// Parses the arguments of `INDEX <number> <mm:ss:ff>`.
fn parse_index(rest: &str) -> FieldResult<Index> {
    let rest = rest.trim();
    let (number, timecode) = rest
        .split_once(' ')
        .ok_or_else(|| FieldError::Timecode(rest.to_string()))?;

    let number = parse_int(number)?;
    let (minutes, seconds, frames) = parse_timecode(timecode)?;

    Ok(Index::new(number, minutes, seconds, frames))
}

/// Parses the arguments of `TRACK <number> <datatype>`. A missing data type means AUDIO.
fn parse_track(rest: &str) -> FieldResult<Track> {
    let rest = rest.trim();
    let (number, data_type) = rest.split_once(' ').unwrap_or((rest, ""));

    let number = number.trim();
    let number = number
        .parse::<u32>()
        .map_err(|_| FieldError::Integer(number.to_string()))?;

    Ok(Track::new(number, DataType::from_token(data_type)))
}

/// Parses the arguments of `FILE "<name>" <type>`; the type is the text after the last space.
fn parse_file(rest: &str) -> FieldResult<AudioFile> {
    let (filename, file_type) = match rest.rfind(' ') {
        Some(pos) => (rest[..pos].trim(), FileType::from_token(&rest[pos..])),
        None => (rest.trim(), FileType::Binary),
    };

    Ok(AudioFile::new(strip_quotes(filename)?, file_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::error::CueError;
    use crate::cue::lines::DEFAULT_DELIMITERS;
    use crate::cue::models::Flag;

    fn parse(text: &str) -> CueResult<CueSheet> {
        CueParser::new(text, DEFAULT_DELIMITERS).parse()
    }

    const SAMPLE: &str = r#"REM GENRE Rock
REM DATE 1999
CATALOG 1234567890123
PERFORMER "The Band"
SONGWRITER "Band Writer"
TITLE "Greatest Hits"
CDTEXTFILE "hits.cdt"
FILE "Greatest Hits.wav" WAVE
  TRACK 01 AUDIO
    TITLE "Opener"
    PERFORMER "The Band"
    SONGWRITER "Track Writer"
    ISRC USRC17607839
    FLAGS DCP PRE
    INDEX 01 00:00:00
  TRACK 02 AUDIO
    TITLE "Closer"
    PREGAP 00:02:00
    INDEX 00 03:58:50
    INDEX 01 04:00:00
    POSTGAP 00:01:10
"#;

    #[test]
    fn parses_global_and_track_fields() {
        let sheet = parse(SAMPLE).unwrap();

        assert_eq!(sheet.comments(), &["GENRE Rock".to_string(), "DATE 1999".to_string()]);
        assert_eq!(sheet.catalog(), "1234567890123");
        assert_eq!(sheet.songwriter(), "Band Writer");
        assert_eq!(sheet.cd_text_file(), "hits.cdt");
        assert_eq!(sheet.performer(), "The Band");
        assert_eq!(sheet.title(), "Greatest Hits");
        assert_eq!(sheet.tracks().len(), 2);

        let first = &sheet.tracks()[0];
        assert_eq!(first.number(), 1);
        assert_eq!(first.data_type(), DataType::Audio);
        assert_eq!(
            first.data_file(),
            Some(&AudioFile::new("Greatest Hits.wav", FileType::Wave))
        );
        assert_eq!(first.title(), "Opener");
        assert_eq!(first.songwriter(), "Track Writer");
        assert_eq!(first.isrc(), "USRC17607839");
        assert_eq!(first.flags(), &[Flag::Dcp, Flag::Pre]);
        assert_eq!(first.indices(), &[Index::new(1, 0, 0, 0)]);

        let second = &sheet.tracks()[1];
        assert_eq!(second.number(), 2);
        assert_eq!(second.data_file(), None);
        assert_eq!(second.pregap(), Some(Index::gap(0, 2, 0)));
        assert_eq!(second.postgap(), Some(Index::gap(0, 1, 10)));
        assert_eq!(
            second.indices(),
            &[Index::new(0, 3, 58, 50), Index::new(1, 4, 0, 0)]
        );
    }

    #[test]
    fn index_components_are_clamped() {
        let sheet = parse("TRACK 01 AUDIO\nINDEX 1 150:99:99\nINDEX 1 -5:-1:-1\nINDEX 250 0:0:0").unwrap();
        let indices = sheet.tracks()[0].indices();

        assert_eq!(
            (indices[0].minutes(), indices[0].seconds(), indices[0].frames()),
            (99, 59, 74)
        );
        assert_eq!(
            (indices[1].minutes(), indices[1].seconds(), indices[1].frames()),
            (0, 0, 0)
        );
        assert_eq!(indices[2].number(), 99);
    }

    #[test]
    fn comments_follow_the_active_scope() {
        let sheet = parse("REM hello\nTRACK 01 AUDIO\nREM hello").unwrap();
        assert_eq!(sheet.comments(), &["hello".to_string()]);
        assert_eq!(sheet.tracks()[0].comments(), &["hello".to_string()]);
    }

    #[test]
    fn empty_comments_are_dropped() {
        let sheet = parse("REM\nREM   \nTRACK 01 AUDIO\nREM").unwrap();
        assert!(sheet.comments().is_empty());
        assert!(sheet.tracks()[0].comments().is_empty());
    }

    #[test]
    fn flags_are_deduplicated_and_filtered() {
        let sheet = parse("TRACK 01 AUDIO\nFLAGS DCP DCP PRE").unwrap();
        assert_eq!(sheet.tracks()[0].flags(), &[Flag::Dcp, Flag::Pre]);

        let sheet = parse("TRACK 01 AUDIO\nflags  4ch bogus  scms data flags").unwrap();
        assert_eq!(
            sheet.tracks()[0].flags(),
            &[Flag::FourChannel, Flag::Scms, Flag::Data]
        );
    }

    #[test]
    fn global_only_and_track_only_fields_are_dropped_out_of_scope() {
        let sheet = parse(
            "ISRC ABC\nFLAGS DCP\nTRACK 01 AUDIO\nCATALOG 1234567890123\nCDTEXTFILE \"x.cdt\"",
        )
        .unwrap();

        assert_eq!(sheet.catalog(), "");
        assert_eq!(sheet.cd_text_file(), "");
        assert!(sheet.garbage().is_empty());
        assert_eq!(sheet.tracks()[0].isrc(), "");
        assert!(sheet.tracks()[0].flags().is_empty());
        assert!(sheet.tracks()[0].garbage().is_empty());
    }

    #[test]
    fn indices_and_gaps_before_any_track_are_ignored() {
        let sheet = parse("INDEX 01 00:00:00\nPREGAP 00:02:00\nTRACK 01 AUDIO").unwrap();
        assert!(sheet.tracks()[0].indices().is_empty());
        assert_eq!(sheet.tracks()[0].pregap(), None);
    }

    #[test]
    fn file_is_attached_to_the_next_track_only() {
        let sheet = parse("FILE \"a.wav\" WAVE\nTRACK 01 AUDIO\nTRACK 02 AUDIO").unwrap();
        assert_eq!(sheet.tracks()[0].data_file().unwrap().filename, "a.wav");
        assert_eq!(sheet.tracks()[1].data_file(), None);
    }

    #[test]
    fn file_with_empty_name_is_not_attached() {
        let sheet = parse("FILE \"\" WAVE\nTRACK 01 AUDIO\nINDEX 01 00:00:00").unwrap();
        assert_eq!(sheet.tracks()[0].data_file(), None);

        let reparsed = parse(&sheet.to_string()).unwrap();
        assert_eq!(reparsed, sheet);
    }

    #[test]
    fn trailing_file_is_discarded() {
        let sheet = parse("TRACK 01 AUDIO\nFILE \"b.wav\" WAVE").unwrap();
        assert_eq!(sheet.tracks().len(), 1);
        assert_eq!(sheet.tracks()[0].data_file(), None);
    }

    #[test]
    fn later_file_replaces_pending_file() {
        let sheet = parse("FILE \"a.wav\" WAVE\nFILE \"b.bin\" binary\nTRACK 01 MODE1/2352").unwrap();
        assert_eq!(
            sheet.tracks()[0].data_file(),
            Some(&AudioFile::new("b.bin", FileType::Binary))
        );
        assert_eq!(sheet.tracks()[0].data_type(), DataType::Mode1_2352);
    }

    #[test]
    fn file_names_may_contain_spaces_and_unknown_types() {
        let file = parse_file("\"My Album - Disc 1.flac\" FLAC").unwrap();
        assert_eq!(file, AudioFile::new("My Album - Disc 1.flac", FileType::Binary));

        let file = parse_file("bare.mp3 MP3").unwrap();
        assert_eq!(file, AudioFile::new("bare.mp3", FileType::Mp3));

        let file = parse_file("lonely.bin").unwrap();
        assert_eq!(file, AudioFile::new("lonely.bin", FileType::Binary));
    }

    #[test]
    fn unrecognized_lines_become_garbage_verbatim() {
        let sheet = parse("FOO BAR\nTRACK 01 AUDIO\nFOO BAR\nREM x").unwrap();
        assert_eq!(sheet.garbage(), &["FOO BAR".to_string()]);
        assert_eq!(sheet.tracks()[0].garbage(), &["FOO BAR".to_string()]);
        assert_eq!(sheet.tracks()[0].comments(), &["x".to_string()]);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let sheet = parse("title \"Disc\"\ntrack 3 cdg\nperformer Someone").unwrap();
        assert_eq!(sheet.title(), "Disc");
        assert_eq!(sheet.tracks()[0].number(), 3);
        assert_eq!(sheet.tracks()[0].data_type(), DataType::CdG);
        assert_eq!(sheet.tracks()[0].performer(), "Someone");
    }

    #[test]
    fn unknown_data_type_defaults_to_audio() {
        let sheet = parse("TRACK 01 MODE9/1\nTRACK 02").unwrap();
        assert_eq!(sheet.tracks()[0].data_type(), DataType::Audio);
        assert_eq!(sheet.tracks()[1].data_type(), DataType::Audio);
    }

    #[test]
    fn quotes_are_stripped_up_to_the_last_quote() {
        assert_eq!(strip_quotes("\"plain\""), Ok("plain"));
        assert_eq!(strip_quotes("\"a\"b\""), Ok("a\"b"));
        assert_eq!(strip_quotes("\"a\" trailing"), Ok("a"));
        assert_eq!(strip_quotes("unquoted \"x\""), Ok("unquoted \"x\""));
        assert_eq!(strip_quotes(""), Ok(""));
        assert_eq!(strip_quotes("\"open"), Err(FieldError::UnbalancedQuote));
    }

    #[test]
    fn timecode_splits_at_first_and_last_colon() {
        assert_eq!(parse_timecode("01:02:03"), Ok((1, 2, 3)));
        assert_eq!(parse_timecode(" 1: 2 :3 "), Ok((1, 2, 3)));
        assert!(parse_timecode("01:02").is_err());
        assert!(parse_timecode("010203").is_err());
        assert!(parse_timecode("01:02:03:04").is_err());
        assert!(parse_timecode("aa:02:03").is_err());
    }

    #[test]
    fn malformed_track_number_is_fatal() {
        let err = parse("REM x\nTRACK abc AUDIO").unwrap_err();
        match err {
            CueError::MalformedInteger { line, value, text } => {
                assert_eq!(line, 2);
                assert_eq!(value, "abc");
                assert_eq!(text, "TRACK abc AUDIO");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_index_is_fatal() {
        let err = parse("TRACK 01 AUDIO\nINDEX x 00:00:00").unwrap_err();
        assert!(matches!(err, CueError::MalformedInteger { line: 2, .. }));

        let err = parse("TRACK 01 AUDIO\n\nINDEX 01 00-00-00").unwrap_err();
        assert!(matches!(err, CueError::MalformedTimecode { line: 3, .. }));

        let err = parse("TRACK 01 AUDIO\nINDEX 01").unwrap_err();
        assert!(matches!(err, CueError::MalformedTimecode { .. }));

        let err = parse("TRACK 01 AUDIO\nPREGAP soon").unwrap_err();
        assert!(matches!(err, CueError::MalformedTimecode { .. }));
    }

    #[test]
    fn unbalanced_quote_is_fatal() {
        let err = parse("TITLE \"Unfinished").unwrap_err();
        assert!(matches!(err, CueError::UnbalancedQuote { line: 1, .. }));
    }

    #[test]
    fn custom_delimiters_split_lines() {
        let sheet = CueParser::new("TITLE \"T\"\rTRACK 01 AUDIO\rINDEX 01 00:00:00", &['\r'])
            .parse()
            .unwrap();
        assert_eq!(sheet.title(), "T");
        assert_eq!(sheet.tracks()[0].indices().len(), 1);
    }
}
