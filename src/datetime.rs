use crate::error::{ParseError, Result};
use chrono::NaiveDate;
use std::borrow::Cow;

/// Maps a message time such as `9:05pm`, `12:00am` or `22:47` to the hour of
/// the day in 24 hour format.
///
/// A single digit hour is padded with a `0` first. With a lowercase `pm`
/// suffix, `12` stays `12` and other hours get `12` added. Without it, `12`
/// becomes `0` and other hours pass through unchanged, so 24 hour times like
/// `23:59` map to `23` but `12:30` maps to `0`.
pub fn to_hour24(time: &str) -> Result<u32> {
    let invalid = || ParseError::InvalidTime(time.to_string());

    if time.chars().count() < 2 {
        return Err(invalid());
    }

    let time: Cow<str> = if time.as_bytes()[1] == b':' {
        Cow::Owned(format!("0{}", time))
    } else {
        Cow::Borrowed(time)
    };

    let hour: u32 = time
        .get(..2)
        .ok_or_else(invalid)?
        .parse()
        .map_err(|_| invalid())?;

    let hour = if time.ends_with("pm") {
        if hour == 12 { 12 } else { hour + 12 }
    } else if hour == 12 {
        0
    } else {
        hour
    };

    if hour > 23 {
        return Err(invalid());
    }
    Ok(hour)
}

/// Pads a year to `4` digits; 2 digit years are assumed to be in the
/// 2000-2099 range.
pub fn normalize_year(year: &str) -> String {
    if year.len() <= 2 {
        format!("20{:0>2}", year)
    } else {
        year.to_string()
    }
}

/// Turns a `DD/MM/YY` message date into a calendar date.
///
/// Returns `None` for dates that only match syntactically, like `31/02/17`.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    let mut parts = date.split('/').map(str::trim);
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year: i32 = normalize_year(parts.next()?).parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
