// src/cue/models
use crate::cue::error::{CueError, CueResult};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

pub const FRAMES_PER_SECOND: u32 = 75;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CueSheet {
    catalog: String,
    cd_text_file: String,
    comments: Vec<String>,
    garbage: Vec<String>,
    performer: String,
    songwriter: String,
    title: String,
    tracks: Vec<Track>,
}

impl CueSheet {
    /// Creates an empty cue sheet to be filled programmatically.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    pub fn set_catalog(&mut self, catalog: impl Into<String>) {
        self.catalog = catalog.into();
    }

    pub fn cd_text_file(&self) -> &str {
        &self.cd_text_file
    }

    pub fn set_cd_text_file(&mut self, cd_text_file: impl Into<String>) {
        self.cd_text_file = cd_text_file.into();
    }

    pub fn performer(&self) -> &str {
        &self.performer
    }

    pub fn set_performer(&mut self, performer: impl Into<String>) {
        self.performer = performer.into();
    }

    pub fn songwriter(&self) -> &str {
        &self.songwriter
    }

    pub fn set_songwriter(&mut self, songwriter: impl Into<String>) {
        self.songwriter = songwriter.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Appends a disc-level comment. Blank comments are ignored.
    pub fn add_comment(&mut self, comment: impl Into<String>) {
        push_non_blank(&mut self.comments, comment.into());
    }

    /// Lines that were not understood while parsing the global part of the sheet.
    pub fn garbage(&self) -> &[String] {
        &self.garbage
    }

    pub fn add_garbage(&mut self, line: impl Into<String>) {
        push_non_blank(&mut self.garbage, line.into());
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, position: usize) -> Option<&Track> {
        self.tracks.get(position)
    }

    pub fn track_mut(&mut self, position: usize) -> Option<&mut Track> {
        self.tracks.get_mut(position)
    }

    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Appends an audio track numbered after the current track count.
    pub fn push_track(&mut self, title: impl Into<String>, performer: impl Into<String>) -> &mut Track {
        self.push_track_with_data_type(title, performer, DataType::Audio)
    }

    pub fn push_track_with_data_type(
        &mut self,
        title: impl Into<String>,
        performer: impl Into<String>,
        data_type: DataType,
    ) -> &mut Track {
        let mut track = Track::new(self.next_track_number(), data_type);
        track.set_title(title);
        track.set_performer(performer);
        self.push_and_get(track)
    }

    pub fn push_track_with_file(
        &mut self,
        title: impl Into<String>,
        performer: impl Into<String>,
        filename: impl Into<String>,
        file_type: FileType,
    ) -> &mut Track {
        let mut track = Track::new(self.next_track_number(), DataType::Audio);
        track.set_title(title);
        track.set_performer(performer);
        track.set_data_file(Some(AudioFile::new(filename, file_type)));
        self.push_and_get(track)
    }

    /// Removes the track at `position`, shifting later tracks down. Track numbers are left as they are.
    pub fn remove_track(&mut self, position: usize) -> Option<Track> {
        if position < self.tracks.len() {
            Some(self.tracks.remove(position))
        } else {
            None
        }
    }

    pub fn add_index(
        &mut self,
        track_position: usize,
        number: i32,
        minutes: i32,
        seconds: i32,
        frames: i32,
    ) -> CueResult<()> {
        self.track_mut(track_position)
            .ok_or(CueError::NoSuchTrack(track_position))?
            .add_index(number, minutes, seconds, frames);
        Ok(())
    }

    /// Removes an index by its position in the track, which is not necessarily its number.
    pub fn remove_index(&mut self, track_position: usize, index_position: usize) -> CueResult<Option<Index>> {
        Ok(self
            .track_mut(track_position)
            .ok_or(CueError::NoSuchTrack(track_position))?
            .remove_index(index_position))
    }

    fn next_track_number(&self) -> u32 {
        self.tracks.len() as u32 + 1
    }

    fn push_and_get(&mut self, track: Track) -> &mut Track {
        self.tracks.push(track);
        let last = self.tracks.len() - 1;
        &mut self.tracks[last]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Track {
    number: u32,
    data_type: DataType,
    data_file: Option<AudioFile>,
    flags: Vec<Flag>,
    isrc: String,
    performer: String,
    songwriter: String,
    title: String,
    comments: Vec<String>,
    garbage: Vec<String>,
    indices: Vec<Index>,
    pregap: Option<Index>,
    postgap: Option<Index>,
}

impl Track {
    pub fn new(number: u32, data_type: DataType) -> Self {
        Self {
            number,
            data_type,
            ..Self::default()
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn set_number(&mut self, number: u32) {
        self.number = number;
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn set_data_type(&mut self, data_type: DataType) {
        self.data_type = data_type;
    }

    pub fn data_file(&self) -> Option<&AudioFile> {
        self.data_file.as_ref()
    }

    pub fn set_data_file(&mut self, data_file: Option<AudioFile>) {
        self.data_file = data_file;
    }

    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Adds a flag unless the track already carries it. Returns whether it was added.
    pub fn add_flag(&mut self, flag: Flag) -> bool {
        if self.flags.contains(&flag) {
            return false;
        }
        self.flags.push(flag);
        true
    }

    /// Adds the flag spelled by `token`; unknown tokens are ignored.
    pub fn add_flag_token(&mut self, token: &str) -> bool {
        match Flag::from_token(token) {
            Some(flag) => self.add_flag(flag),
            None => false,
        }
    }

    pub fn isrc(&self) -> &str {
        &self.isrc
    }

    pub fn set_isrc(&mut self, isrc: impl Into<String>) {
        self.isrc = isrc.into();
    }

    pub fn performer(&self) -> &str {
        &self.performer
    }

    pub fn set_performer(&mut self, performer: impl Into<String>) {
        self.performer = performer.into();
    }

    pub fn songwriter(&self) -> &str {
        &self.songwriter
    }

    pub fn set_songwriter(&mut self, songwriter: impl Into<String>) {
        self.songwriter = songwriter.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        push_non_blank(&mut self.comments, comment.into());
    }

    pub fn garbage(&self) -> &[String] {
        &self.garbage
    }

    pub fn add_garbage(&mut self, line: impl Into<String>) {
        push_non_blank(&mut self.garbage, line.into());
    }

    pub fn indices(&self) -> &[Index] {
        &self.indices
    }

    pub fn index(&self, position: usize) -> Option<&Index> {
        self.indices.get(position)
    }

    pub fn add_index(&mut self, number: i32, minutes: i32, seconds: i32, frames: i32) {
        self.indices.push(Index::new(number, minutes, seconds, frames));
    }

    pub fn push_index(&mut self, index: Index) {
        self.indices.push(index);
    }

    pub fn remove_index(&mut self, position: usize) -> Option<Index> {
        if position < self.indices.len() {
            Some(self.indices.remove(position))
        } else {
            None
        }
    }

    pub fn pregap(&self) -> Option<Index> {
        self.pregap
    }

    pub fn set_pregap(&mut self, pregap: Option<Index>) {
        self.pregap = pregap;
    }

    pub fn postgap(&self) -> Option<Index> {
        self.postgap
    }

    pub fn set_postgap(&mut self, postgap: Option<Index>) {
        self.postgap = postgap;
    }

    /// Playback offset of the track: the second index if there is one, else the first, else zero.
    pub fn offset(&self) -> Duration {
        match self.indices.as_slice() {
            [] => Duration::ZERO,
            [only] => only.to_duration(),
            [_, second, ..] => second.to_duration(),
        }
    }
}

/// A position inside a track. Every component is clamped into its valid range on construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Index {
    number: u8,
    minutes: u8,
    seconds: u8,
    frames: u8,
}

impl Index {
    pub fn new(number: i32, minutes: i32, seconds: i32, frames: i32) -> Self {
        Self {
            number: number.clamp(0, 99) as u8,
            minutes: minutes.clamp(0, 99) as u8,
            seconds: seconds.clamp(0, 59) as u8,
            frames: frames.clamp(0, FRAMES_PER_SECOND as i32 - 1) as u8,
        }
    }

    /// Index used for PREGAP/POSTGAP, which carry no number of their own.
    pub fn gap(minutes: i32, seconds: i32, frames: i32) -> Self {
        Self::new(0, minutes, seconds, frames)
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn frames(&self) -> u8 {
        self.frames
    }

    pub fn set_number(&mut self, number: i32) {
        self.number = number.clamp(0, 99) as u8;
    }

    /// Frames are truncated to whole milliseconds.
    pub fn to_duration(&self) -> Duration {
        let seconds = self.minutes as u64 * 60 + self.seconds as u64;
        let millis = self.frames as u64 * 1000 / FRAMES_PER_SECOND as u64;
        Duration::from_secs(seconds) + Duration::from_millis(millis)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AudioFile {
    pub filename: String,
    pub file_type: FileType,
}

impl AudioFile {
    pub fn new(filename: impl Into<String>, file_type: FileType) -> Self {
        Self {
            filename: filename.into(),
            file_type,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileType {
    #[default]
    Binary,
    Motorola,
    Aiff,
    Wave,
    Mp3,
}

impl FileType {
    /// Reads a file type token case-insensitively; anything unknown is BINARY.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_uppercase().as_str() {
            "MOTOROLA" => FileType::Motorola,
            "AIFF" => FileType::Aiff,
            "WAVE" => FileType::Wave,
            "MP3" => FileType::Mp3,
            _ => FileType::Binary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Binary => "BINARY",
            FileType::Motorola => "MOTOROLA",
            FileType::Aiff => "AIFF",
            FileType::Wave => "WAVE",
            FileType::Mp3 => "MP3",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum DataType {
    #[default]
    #[serde(rename = "AUDIO")]
    Audio,
    #[serde(rename = "CDG")]
    CdG,
    #[serde(rename = "MODE1/2048")]
    Mode1_2048,
    #[serde(rename = "MODE1/2352")]
    Mode1_2352,
    #[serde(rename = "MODE2/2336")]
    Mode2_2336,
    #[serde(rename = "MODE2/2352")]
    Mode2_2352,
    #[serde(rename = "CDI/2336")]
    CdI2336,
    #[serde(rename = "CDI/2352")]
    CdI2352,
}

impl DataType {
    /// Reads a track data type token case-insensitively; anything unknown is AUDIO.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_uppercase().as_str() {
            "CDG" => DataType::CdG,
            "MODE1/2048" => DataType::Mode1_2048,
            "MODE1/2352" => DataType::Mode1_2352,
            "MODE2/2336" => DataType::Mode2_2336,
            "MODE2/2352" => DataType::Mode2_2352,
            "CDI/2336" => DataType::CdI2336,
            "CDI/2352" => DataType::CdI2352,
            _ => DataType::Audio,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Audio => "AUDIO",
            DataType::CdG => "CDG",
            DataType::Mode1_2048 => "MODE1/2048",
            DataType::Mode1_2352 => "MODE1/2352",
            DataType::Mode2_2336 => "MODE2/2336",
            DataType::Mode2_2352 => "MODE2/2352",
            DataType::CdI2336 => "CDI/2336",
            DataType::CdI2352 => "CDI/2352",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subcode flags of a track.
///
/// - DCP: digital copy permitted
/// - 4CH: four channel audio
/// - PRE: pre-emphasis enabled
/// - SCMS: serial copy management system
/// - DATA: set for non-audio tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Flag {
    Data,
    Dcp,
    FourChannel,
    Pre,
    Scms,
}

impl Flag {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_uppercase().as_str() {
            "DATA" => Some(Flag::Data),
            "DCP" => Some(Flag::Dcp),
            "4CH" => Some(Flag::FourChannel),
            "PRE" => Some(Flag::Pre),
            "SCMS" => Some(Flag::Scms),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Data => "DATA",
            Flag::Dcp => "DCP",
            Flag::FourChannel => "4CH",
            Flag::Pre => "PRE",
            Flag::Scms => "SCMS",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn push_non_blank(lines: &mut Vec<String>, line: String) {
    if !line.trim().is_empty() {
        lines.push(line);
    }
}
