use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use chatlog_stats::report::render_text;
use chatlog_stats::{ChatStats, MEDIA_OMITTED, StatsOptions, parse_files};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Message statistics for exported chat logs.
#[derive(Debug, Parser)]
#[command(name = "chatlog-stats", version, about)]
struct Cli {
    /// Chat export text files to analyse.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Number of authors to show in each ranking.
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Show every author instead of the top ones.
    #[arg(long, conflicts_with = "top")]
    all: bool,

    /// Message body that marks a media attachment.
    #[arg(long, default_value = MEDIA_OMITTED)]
    media_sentinel: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level or filter directive, e.g. `debug` or `chatlog_stats=trace`.
    #[arg(long, env = "CHATLOG_LOG", default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn stats_options(&self) -> StatsOptions {
        StatsOptions {
            top_n: if self.all { None } else { Some(self.top) },
            media_sentinel: self.media_sentinel.clone(),
        }
    }
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    #[serde(flatten)]
    stats: &'a ChatStats,
}

fn setup_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    tracing::info!("chatlog-stats v{} starting", env!("CARGO_PKG_VERSION"));

    let options = cli.stats_options();
    let mut all_stats = Vec::with_capacity(cli.files.len());
    for (path, parsed) in cli.files.iter().zip(parse_files(&cli.files)) {
        let records = parsed.with_context(|| format!("parsing {}", path.display()))?;
        let stats = ChatStats::compute(&records, &options)
            .with_context(|| format!("computing stats for {}", path.display()))?;
        all_stats.push((path, stats));
    }

    match cli.format {
        OutputFormat::Text => {
            for (i, (path, stats)) in all_stats.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", render_text(stats, &path.display().to_string()));
            }
        }
        OutputFormat::Json => {
            let reports: Vec<FileReport> = all_stats
                .iter()
                .map(|(path, stats)| FileReport {
                    file: path.display().to_string(),
                    stats,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["chatlog-stats", "chat.txt"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("chat.txt")]);
        assert_eq!(cli.format, OutputFormat::Text);
        let options = cli.stats_options();
        assert_eq!(options.top_n, Some(10));
        assert_eq!(options.media_sentinel, MEDIA_OMITTED);
    }

    #[test]
    fn test_cli_all_and_json() {
        let cli = Cli::try_parse_from([
            "chatlog-stats",
            "--all",
            "--format",
            "json",
            "--media-sentinel",
            "<Médias omis>",
            "a.txt",
            "b.txt",
        ])
        .unwrap();
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.stats_options().top_n, None);
        assert_eq!(cli.stats_options().media_sentinel, "<Médias omis>");
    }

    #[test]
    fn test_cli_requires_files() {
        assert!(Cli::try_parse_from(["chatlog-stats"]).is_err());
    }
}
