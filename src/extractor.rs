use crate::error::{ParseError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // One to three words, or a phone number, in front of a colon. The
    // European phone alternative carries no colon, so notifications like
    // `+49 1234 1234567 joined` match too.
    static ref REGEX_AUTHOR_PREFIX: Regex = Regex::new(concat!(
        r"^(?:",
        r"\w+:",
        r"|\w+\s+\w+:",
        r"|\w+\s+\w+\s+\w+:",
        r"|\+\d{2} \d{5} \d{5}:",
        r"|\+\d{2} \d{3} \d{3} \d{4}:",
        r"|\+\d{2} \d{4} \d{7}",
        r")"
    ))
    .unwrap();
}

const HEADER_SEPARATOR: &str = " - ";
const DATE_TIME_SEPARATOR: &str = ", ";
const AUTHOR_SEPARATOR: &str = ": ";

/// The pieces of a single boundary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub date: String,
    pub time: String,
    pub author: Option<String>,
    pub message: String,
}

/// Checks if `text` starts with something that looks like an author name or
/// phone number followed by a colon.
///
/// This is a heuristic: message text such as `Note: bring snacks` without an
/// author would also match.
pub fn has_author_prefix(text: &str) -> bool {
    REGEX_AUTHOR_PREFIX.is_match(text)
}

/// Splits a boundary line such as
/// `18/06/17, 22:47 - Loki: Why do you have 2 numbers, Banner?` into its
/// date, time, optional author and message.
///
/// Only the first ` - ` separates the header from the body, and only the
/// first `: ` separates the author from the message; later occurrences stay
/// in the message untouched.
pub fn extract_fields(line: &str) -> Result<ExtractedFields> {
    let (header, body) = line
        .split_once(HEADER_SEPARATOR)
        .ok_or_else(|| ParseError::malformed(line, "missing ` - ` separator"))?;
    let (date, time) = header
        .split_once(DATE_TIME_SEPARATOR)
        .ok_or_else(|| ParseError::malformed(line, "missing `, ` between date and time"))?;
    let (author, message) = split_author(body);

    Ok(ExtractedFields {
        date: date.to_string(),
        time: time.to_string(),
        author: author.map(str::to_string),
        message: message.to_string(),
    })
}

fn split_author(body: &str) -> (Option<&str>, &str) {
    if !has_author_prefix(body) {
        return (None, body);
    }
    // Without a `: ` the whole body is taken as the author, e.g. `Luke:` once
    // its trailing space is trimmed, or a European number with no colon.
    match body.split_once(AUTHOR_SEPARATOR) {
        Some((author, message)) => (Some(author), message),
        None => (Some(body), ""),
    }
}
