use crate::classifier::is_message_start;
use crate::error::Result;
use crate::extractor::extract_fields;
use crate::models::{ChatRecord, ParseState};
use tracing::{debug, trace};

#[derive(Debug, Default)]
enum ParserState {
    #[default]
    AwaitingFirstMessage,
    InMessage(ParseState),
}

/// Line driven state machine that assembles multi-line messages.
///
/// Feed it lines in file order; every boundary line closes the message before
/// it. Each parser owns its state, so independent exports can be parsed on
/// separate threads with one parser each.
#[derive(Debug, Default)]
pub struct ChatParser {
    state: ParserState,
    line_number: usize,
    discarded: usize,
}

impl ChatParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one line and returns the message it completed, if any.
    ///
    /// The line is trimmed before classification. Lines that are not
    /// boundaries are appended verbatim to the open message, or dropped when
    /// no message has been opened yet.
    pub fn feed(&mut self, line: &str) -> Result<Option<ChatRecord>> {
        self.line_number += 1;
        let line = line.trim();

        if is_message_start(line) {
            trace!(line_number = self.line_number, "boundary line");
            let fields = extract_fields(line).map_err(|e| e.at_line(self.line_number))?;
            let previous = std::mem::replace(
                &mut self.state,
                ParserState::InMessage(ParseState::open(fields)),
            );
            return Ok(match previous {
                ParserState::InMessage(state) => state.into_record(),
                ParserState::AwaitingFirstMessage => None,
            });
        }

        match &mut self.state {
            ParserState::InMessage(state) => {
                trace!(line_number = self.line_number, "continuation line");
                state.buffer.push(line.to_string());
            }
            ParserState::AwaitingFirstMessage => {
                trace!(line_number = self.line_number, "discarding line before first message");
                self.discarded += 1;
            }
        }
        Ok(None)
    }

    /// Ends the input, returning the message still open, if any.
    pub fn finish(self) -> Option<ChatRecord> {
        debug!(
            lines = self.line_number,
            discarded = self.discarded,
            "finished parsing"
        );
        match self.state {
            ParserState::InMessage(state) => state.into_record(),
            ParserState::AwaitingFirstMessage => None,
        }
    }

    /// Number of lines fed so far.
    pub fn lines_seen(&self) -> usize {
        self.line_number
    }
}

/// Iterator over the messages of a sequence of lines.
///
/// Stops after the first error.
pub struct Records<I> {
    lines: I,
    parser: Option<ChatParser>,
}

impl<I> Records<I> {
    pub fn new(lines: I) -> Self {
        Records {
            lines,
            parser: Some(ChatParser::new()),
        }
    }
}

impl<I, S> Iterator for Records<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<ChatRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let parser = self.parser.as_mut()?;
        for line in self.lines.by_ref() {
            match parser.feed(line.as_ref()) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => {}
                Err(e) => {
                    self.parser = None;
                    return Some(Err(e));
                }
            }
        }
        self.parser.take()?.finish().map(Ok)
    }
}

/// Parses a slice of lines into messages, in order.
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<Vec<ChatRecord>> {
    Records::new(lines.iter()).collect()
}
