//! Parse exported chat logs (`DD/MM/YY, HH:MM - Author: message`) into
//! [`ChatRecord`]s and compute per-author activity statistics over them.

pub mod classifier;
pub mod datetime;
pub mod error;
pub mod extractor;
pub mod models;
pub mod parser;
pub mod report;
pub mod stats;

pub use crate::error::{ParseError, Result};
pub use crate::models::{ChatRecord, MEDIA_OMITTED};
pub use crate::parser::{ChatParser, Records};
pub use crate::stats::{ChatStats, StatsOptions};

use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use memmap2::Mmap;
use rayon::prelude::*;
use tracing::{debug, warn};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Parses the whole text of a chat export.
pub fn parse_string(s: &str) -> Result<Vec<ChatRecord>> {
    let s = strip_bom(s);
    debug!(bytes = s.len(), "parse_string called");
    Records::new(s.lines()).collect()
}

/// Parses a chat export line by line from any buffered reader.
///
/// Stops at the first read error.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<ChatRecord>> {
    let mut read_error = None;
    let lines = reader
        .lines()
        .enumerate()
        .map_while(|(i, line)| match line {
            Ok(line) if i == 0 => Some(strip_bom(&line).to_string()),
            Ok(line) => Some(line),
            Err(e) => {
                read_error = Some(e);
                None
            }
        });
    let records = Records::new(lines).collect::<Result<Vec<_>>>();

    match read_error {
        Some(e) => Err(e.into()),
        None => records,
    }
}

fn strip_bom(s: &str) -> &str {
    s.strip_prefix(BYTE_ORDER_MARK).unwrap_or(s)
}

/// Memory-maps a chat export file and parses it without copying its contents
/// into an intermediate `String`.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<ChatRecord>> {
    let path = path.as_ref();
    let file_read = |source: std::io::Error| ParseError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(file_read)?;
    if file.metadata().map_err(file_read)?.len() == 0 {
        debug!(path = %path.display(), "empty chat file");
        return Ok(Vec::new());
    }

    // SAFETY: the map is read-only and dropped before returning; truncating
    // the file while it is being parsed is not supported.
    let mmap = unsafe { Mmap::map(&file) }.map_err(file_read)?;
    let text =
        std::str::from_utf8(&mmap).map_err(|_| ParseError::InvalidUtf8(path.to_path_buf()))?;
    parse_string(text)
}

/// Parses independent chat exports in parallel, one parser per file.
///
/// Results come back in the order of `paths`.
pub fn parse_files<P: AsRef<Path> + Sync>(paths: &[P]) -> Vec<Result<Vec<ChatRecord>>> {
    paths
        .par_iter()
        .map(|path| {
            let result = parse_file(path);
            if let Err(e) = &result {
                warn!("Failed to parse {}: {}", path.as_ref().display(), e);
            }
            result
        })
        .collect()
}
