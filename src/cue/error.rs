use thiserror::Error;

#[derive(Debug, Error)]
pub enum CueError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("Malformed integer {value:?} on line {line}: {text}")]
    MalformedInteger {
        line: usize,
        value: String,
        text: String,
    },

    #[error("Malformed timecode {value:?} on line {line}: {text}")]
    MalformedTimecode {
        line: usize,
        value: String,
        text: String,
    },

    #[error("Unbalanced quote on line {line}: {text}")]
    UnbalancedQuote { line: usize, text: String },

    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("No track at position {0}")]
    NoSuchTrack(usize),
}

pub type CueResult<T> = Result<T, CueError>;

/// Failure of a single field, before the parser knows which line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FieldError {
    Integer(String),
    Timecode(String),
    UnbalancedQuote,
}

impl FieldError {
    pub(crate) fn at(self, line: usize, text: &str) -> CueError {
        let text = text.to_string();
        match self {
            FieldError::Integer(value) => CueError::MalformedInteger { line, value, text },
            FieldError::Timecode(value) => CueError::MalformedTimecode { line, value, text },
            FieldError::UnbalancedQuote => CueError::UnbalancedQuote { line, text },
        }
    }
}

pub(crate) type FieldResult<T> = Result<T, FieldError>;
