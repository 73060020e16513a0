use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while turning a chat export into records.
///
/// An export with no messages is not an error: every entry point returns an
/// empty record list in that case.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A boundary line could not be split into its date, time and body parts.
    #[error("Malformed message line ({reason}): {line:?}")]
    MalformedLine { line: String, reason: &'static str },

    /// Wraps an error with the 1-based input line it was raised on.
    #[error("Line {line_number}: {source}")]
    AtLine {
        line_number: usize,
        #[source]
        source: Box<ParseError>,
    },

    /// A time string could not be mapped to an hour of the day.
    #[error("Invalid time: {0:?}")]
    InvalidTime(String),

    /// A chat file could not be opened or mapped.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A chat file is not valid UTF-8.
    #[error("Chat file {0} is not valid UTF-8")]
    InvalidUtf8(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub(crate) fn malformed(line: &str, reason: &'static str) -> Self {
        ParseError::MalformedLine {
            line: line.to_string(),
            reason,
        }
    }

    pub(crate) fn at_line(self, line_number: usize) -> Self {
        ParseError::AtLine {
            line_number,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
