use std::fmt;

use crate::stats::{AuthorCount, ChatStats};

/// Plain text report of one export's statistics, headed by a label.
pub struct TextReport<'a> {
    pub stats: &'a ChatStats,
    pub label: &'a str,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats;

        writeln!(f, "== {} ==", self.label)?;
        writeln!(f, "Total messages: {}", stats.total_messages)?;
        writeln!(f, "Media messages: {}", stats.media_messages)?;
        writeln!(f, "Text messages: {}", stats.text_messages)?;
        writeln!(f, "Words: {}", stats.total_words)?;
        writeln!(f, "Letters: {}", stats.total_letters)?;

        write_ranking(f, "Messages per author", &stats.messages_per_author)?;
        write_ranking(f, "Media messages per author", &stats.media_per_author)?;
        write_ranking(f, "Words per author", &stats.words_per_author)?;

        writeln!(f, "\nActivity by hour:")?;
        let max = stats.hourly_activity.iter().copied().max().unwrap_or(0);
        for (hour, &count) in stats.hourly_activity.iter().enumerate() {
            writeln!(f, "  {:02}:00 {:>6} {}", hour, count, bar(count, max))?;
        }
        Ok(())
    }
}

/// Renders `stats` as a plain text report headed by `label`.
pub fn render_text(stats: &ChatStats, label: &str) -> String {
    TextReport { stats, label }.to_string()
}

fn write_ranking(f: &mut fmt::Formatter<'_>, title: &str, ranking: &[AuthorCount]) -> fmt::Result {
    writeln!(f, "\n{}:", title)?;
    if ranking.is_empty() {
        return writeln!(f, "  (none)");
    }
    let width = ranking.iter().map(|r| r.author.chars().count()).max().unwrap_or(0);
    for entry in ranking {
        writeln!(f, "  {:<width$} {:>6}", entry.author, entry.count, width = width)?;
    }
    Ok(())
}

const BAR_WIDTH: usize = 30;

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "#".repeat(count * BAR_WIDTH / max)
}
