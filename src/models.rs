use crate::datetime::{parse_date, to_hour24};
use crate::error::Result;
use crate::extractor::ExtractedFields;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Message body the chat export writes in place of an attachment.
pub const MEDIA_OMITTED: &str = "<Media omitted>";

/// One logical message of a chat export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    /// The date as written in the export, `DD/MM/YY`.
    pub date: String,
    /// The time as written in the export, e.g. `22:47` or `9:15 pm`.
    pub time: String,
    /// The author of the message. Will be None for messages without an
    /// author (system notifications such as `X joined`).
    pub author: Option<String>,
    /// The message itself, continuation lines joined with single spaces.
    pub message: String,
}

impl ChatRecord {
    /// Checks if the message body is exactly `sentinel`.
    pub fn is_media(&self, sentinel: &str) -> bool {
        self.message == sentinel
    }

    /// Hour of the day the message was sent, see [`to_hour24`].
    pub fn hour(&self) -> Result<u32> {
        to_hour24(&self.time)
    }

    /// Calendar date of the message, `None` if the date is not a real day.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// What the parser holds while a message is still open: the header of the
/// last boundary line plus every line of its body seen so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseState {
    pub date: String,
    pub time: String,
    pub author: Option<String>,
    pub buffer: Vec<String>,
}

impl ParseState {
    /// Opens a message from a boundary line, seeding the buffer with its text.
    pub fn open(fields: ExtractedFields) -> Self {
        ParseState {
            date: fields.date,
            time: fields.time,
            author: fields.author,
            buffer: vec![fields.message],
        }
    }

    /// Closes the message. `None` if nothing was buffered.
    pub fn into_record(self) -> Option<ChatRecord> {
        if self.buffer.is_empty() {
            return None;
        }
        Some(ChatRecord {
            date: self.date,
            time: self.time,
            author: self.author,
            message: self.buffer.join(" "),
        })
    }
}
