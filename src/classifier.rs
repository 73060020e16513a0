use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Syntactic `DD/MM/YY` only: `31/02/17` passes, calendar checks happen elsewhere.
    static ref REGEX_DATE_PREFIX: Regex =
        Regex::new(r"^(?:[0-2][0-9]|3[0-1])/(?:0[0-9]|1[0-2])/\d{2}").unwrap();
}

/// Checks if a line opens a new message, i.e. starts with a `DD/MM/YY` stamp.
///
/// Never fails. A continuation line that happens to start with something
/// shaped like a date is also reported as a message start.
pub fn is_message_start(line: &str) -> bool {
    REGEX_DATE_PREFIX.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_message_start_typical_lines() {
        assert!(is_message_start(
            "18/06/17, 22:47 - Loki: Why do you have 2 numbers, Banner?"
        ));
        assert!(is_message_start("01/01/20, 9:05 pm - Thor: hi"));
        assert!(!is_message_start("This is a continuation"));
        assert!(!is_message_start(""));
    }

    #[test]
    fn test_is_message_start_no_calendar_validation() {
        assert!(is_message_start("31/02/99 - x"));
        assert!(is_message_start("00/00/00"));
        assert!(is_message_start("29/12/17"));
    }

    #[test]
    fn test_is_message_start_out_of_range_components() {
        assert!(!is_message_start("32/01/17, 10:00 - a: b"));
        assert!(!is_message_start("32/13/99 - x"));
        assert!(!is_message_start("12/13/17, 10:00 - a: b"));
        assert!(!is_message_start("40/01/17"));
    }

    #[test]
    fn test_is_message_start_is_anchored() {
        assert!(!is_message_start(" 18/06/17, 22:47 - a: b"));
        assert!(!is_message_start("see 18/06/17, 22:47 - a: b"));
        assert!(!is_message_start("8/6/17, 22:47 - a: b"));
        assert!(!is_message_start("2018-06-17 22:47"));
    }

    #[test]
    fn test_is_message_start_date_shaped_continuation() {
        // Accepted limitation: any line opening with a date shape is a boundary.
        assert!(is_message_start("12/05/19 was the day we met"));
    }
}
