//! Per-author activity statistics over parsed chat records.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::models::{ChatRecord, MEDIA_OMITTED};

/// Knobs for [`ChatStats::compute`].
#[derive(Debug, Clone)]
pub struct StatsOptions {
    /// Keep only the `n` most active authors in each ranking; `None` keeps all.
    pub top_n: Option<usize>,
    /// Message body that marks a media attachment.
    pub media_sentinel: String,
}

impl Default for StatsOptions {
    fn default() -> Self {
        StatsOptions {
            top_n: Some(10),
            media_sentinel: MEDIA_OMITTED.to_string(),
        }
    }
}

/// A ranking entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorCount {
    pub author: String,
    pub count: usize,
}

/// Aggregate numbers for one chat export.
///
/// Word, letter, hourly and per-day figures only cover text messages: records
/// with an author whose body is not the media sentinel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatStats {
    pub total_messages: usize,
    pub messages_per_author: Vec<AuthorCount>,
    pub media_messages: usize,
    pub media_per_author: Vec<AuthorCount>,
    pub text_messages: usize,
    pub total_words: usize,
    pub total_letters: usize,
    pub words_per_author: Vec<AuthorCount>,
    pub hourly_activity: [usize; 24],
    pub messages_per_day: BTreeMap<NaiveDate, usize>,
}

/// Number of characters in a message.
pub fn letter_count(message: &str) -> usize {
    message.chars().count()
}

/// Number of whitespace separated words in a message.
pub fn word_count(message: &str) -> usize {
    message.split_whitespace().count()
}

impl ChatStats {
    /// Computes the statistics of `records`.
    ///
    /// Fails with [`InvalidTime`](crate::error::ParseError::InvalidTime) when a text message carries a
    /// time that cannot be bucketed into an hour.
    pub fn compute(records: &[ChatRecord], options: &StatsOptions) -> Result<ChatStats> {
        let sentinel = options.media_sentinel.as_str();

        let mut messages: HashMap<&str, usize> = HashMap::new();
        let mut media: HashMap<&str, usize> = HashMap::new();
        let mut words: HashMap<&str, usize> = HashMap::new();
        let mut media_messages = 0;
        let mut text_messages = 0;
        let mut total_words = 0;
        let mut total_letters = 0;
        let mut hourly_activity = [0usize; 24];
        let mut messages_per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();

        for record in records {
            let is_media = record.is_media(sentinel);
            if is_media {
                media_messages += 1;
            }

            let Some(author) = record.author.as_deref() else {
                continue;
            };
            *messages.entry(author).or_default() += 1;

            if is_media {
                *media.entry(author).or_default() += 1;
                continue;
            }

            let hour = record.hour()?;
            hourly_activity[hour as usize] += 1;

            let n_words = word_count(&record.message);
            *words.entry(author).or_default() += n_words;
            total_words += n_words;
            total_letters += letter_count(&record.message);
            text_messages += 1;

            if let Some(day) = record.calendar_date() {
                *messages_per_day.entry(day).or_default() += 1;
            }
        }

        debug!(
            records = records.len(),
            authors = messages.len(),
            media_messages,
            text_messages,
            "computed chat stats"
        );

        Ok(ChatStats {
            total_messages: records.len(),
            messages_per_author: rank(messages, options.top_n),
            media_messages,
            media_per_author: rank(media, options.top_n),
            text_messages,
            total_words,
            total_letters,
            words_per_author: rank(words, options.top_n),
            hourly_activity,
            messages_per_day,
        })
    }

    /// Hour of the day with the most text messages, earliest on ties.
    pub fn busiest_hour(&self) -> Option<u32> {
        let max = *self.hourly_activity.iter().max()?;
        if max == 0 {
            return None;
        }
        self.hourly_activity
            .iter()
            .position(|&n| n == max)
            .map(|h| h as u32)
    }
}

/// Sorts by count descending, then author ascending, and keeps the top `n`.
fn rank(counts: HashMap<&str, usize>, top_n: Option<usize>) -> Vec<AuthorCount> {
    let mut ranked: Vec<AuthorCount> = counts
        .into_iter()
        .map(|(author, count)| AuthorCount {
            author: author.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.author.cmp(&b.author)));
    if let Some(n) = top_n {
        ranked.truncate(n);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    fn record(time: &str, author: Option<&str>, message: &str) -> ChatRecord {
        ChatRecord {
            date: "18/06/17".to_string(),
            time: time.to_string(),
            author: author.map(str::to_string),
            message: message.to_string(),
        }
    }

    fn count(author: &str, count: usize) -> AuthorCount {
        AuthorCount {
            author: author.to_string(),
            count,
        }
    }

    fn sample() -> Vec<ChatRecord> {
        vec![
            record("09:00", None, "Messages to this group are now secured"),
            record("22:47", Some("Loki"), "Why do you have 2 numbers, Banner?"),
            record("22:48", Some("Banner"), MEDIA_OMITTED),
            record("10:15 pm", Some("Loki"), "hi"),
            record("7:02 am", Some("Thor"), "Where is my hammer"),
            record("7:03 am", Some("Banner"), MEDIA_OMITTED),
        ]
    }

    #[test]
    fn test_letter_and_word_count() {
        assert_eq!(letter_count("héllo"), 5);
        assert_eq!(letter_count(""), 0);
        assert_eq!(word_count("Why do you  have\t2"), 5);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn test_compute_counts() {
        let stats = ChatStats::compute(&sample(), &StatsOptions::default()).unwrap();

        assert_eq!(stats.total_messages, 6);
        assert_eq!(
            stats.messages_per_author,
            vec![count("Banner", 2), count("Loki", 2), count("Thor", 1)]
        );
        assert_eq!(stats.media_messages, 2);
        assert_eq!(stats.media_per_author, vec![count("Banner", 2)]);
        assert_eq!(stats.text_messages, 3);
        assert_eq!(
            stats.words_per_author,
            vec![count("Loki", 8), count("Thor", 4)]
        );
        assert_eq!(stats.total_words, 12);
        assert_eq!(stats.total_letters, 34 + 2 + 18);
    }

    #[test]
    fn test_compute_hourly_activity() {
        let stats = ChatStats::compute(&sample(), &StatsOptions::default()).unwrap();

        let mut expected = [0usize; 24];
        expected[22] = 2;
        expected[7] = 1;
        assert_eq!(stats.hourly_activity, expected);
        assert_eq!(stats.busiest_hour(), Some(22));
    }

    #[test]
    fn test_compute_messages_per_day_skips_invalid_dates() {
        let mut records = sample();
        records.push(ChatRecord {
            date: "31/02/17".to_string(),
            ..record("10:00", Some("Thor"), "ghost day")
        });
        let stats = ChatStats::compute(&records, &StatsOptions::default()).unwrap();

        let day = NaiveDate::from_ymd_opt(2017, 6, 18).unwrap();
        assert_eq!(stats.messages_per_day.len(), 1);
        // Six records share the day, but only three are text messages.
        assert_eq!(stats.messages_per_day[&day], 3);
    }

    #[test]
    fn test_compute_top_n() {
        let options = StatsOptions {
            top_n: Some(1),
            ..Default::default()
        };
        let stats = ChatStats::compute(&sample(), &options).unwrap();
        assert_eq!(stats.messages_per_author, vec![count("Banner", 2)]);

        let options = StatsOptions {
            top_n: None,
            ..Default::default()
        };
        let stats = ChatStats::compute(&sample(), &options).unwrap();
        assert_eq!(stats.messages_per_author.len(), 3);
    }

    #[test]
    fn test_compute_custom_media_sentinel() {
        let records = vec![record("10:00", Some("Loki"), "<Médias omis>")];
        let options = StatsOptions {
            media_sentinel: "<Médias omis>".to_string(),
            ..Default::default()
        };
        let stats = ChatStats::compute(&records, &options).unwrap();
        assert_eq!(stats.media_messages, 1);
        assert_eq!(stats.text_messages, 0);
    }

    #[test]
    fn test_compute_empty() {
        let stats = ChatStats::compute(&[], &StatsOptions::default()).unwrap();
        assert_eq!(stats.total_messages, 0);
        assert!(stats.messages_per_author.is_empty());
        assert_eq!(stats.hourly_activity, [0; 24]);
        assert_eq!(stats.busiest_hour(), None);
    }

    #[test]
    fn test_compute_invalid_time() {
        let records = vec![record("x", Some("Loki"), "hi")];
        let err = ChatStats::compute(&records, &StatsOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidTime(_)));
    }

    #[test]
    fn test_compute_serializes_to_json() {
        let stats = ChatStats::compute(&sample(), &StatsOptions::default()).unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_messages"], 6);
        assert_eq!(json["messages_per_day"]["2017-06-18"], 3);
    }
}
