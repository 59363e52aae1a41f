use std::io::BufRead;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::{LogParseError, RawLogLine};

/// Parses backend log-dump lines into [`RawLogLine`] values.
///
/// Line-oriented and tolerant (the dumps mix JSON objects with plain text):
/// - blank / whitespace-only lines return `Ok(None)`,
/// - JSON objects deserialize through the alias-resolving model,
/// - anything that is not JSON at all is kept as a message-only record,
/// - JSON that is not an object (a bare number, an array) is the one shape
///   reported as an error.
#[derive(Debug, Clone, Default)]
pub struct LogLineParser {
    line_number: usize,
}

impl LogLineParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the internal line counter.
    pub fn reset(&mut self) {
        self.line_number = 0;
    }

    /// Parses a single logical line.
    pub fn parse_line(&mut self, line: &str) -> Result<Option<RawLogLine>, LogParseError> {
        self.line_number = self.line_number.saturating_add(1);
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.chars().all(|ch| ch.is_whitespace()) {
            return Ok(None);
        }

        match serde_json::from_str::<Value>(line) {
            Ok(value @ Value::Object(_)) => serde_json::from_value::<RawLogLine>(value)
                .map(Some)
                .map_err(|source| LogParseError::Shape {
                    line_number: self.line_number,
                    source,
                }),
            Ok(_) => Err(LogParseError::NotAnObject {
                line_number: self.line_number,
            }),
            Err(_) => {
                debug!(
                    line_number = self.line_number,
                    "non-JSON dump line kept as message-only record"
                );
                Ok(Some(RawLogLine::from_text(line)))
            }
        }
    }
}

/// Per-line outcome from a [`LogJsonlReader`].
#[derive(Debug)]
pub struct LogLineRecord {
    /// 1-based line number in the underlying source.
    pub line_number: usize,
    pub outcome: Result<RawLogLine, LogParseError>,
}

pub struct LogJsonlReader<R: BufRead> {
    reader: R,
    parser: LogLineParser,
    line_number: usize,
    buffer: String,
    done: bool,
}

impl<R: BufRead> LogJsonlReader<R> {
    /// Creates a reader-backed iterator with a fresh parser.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            parser: LogLineParser::new(),
            line_number: 0,
            buffer: String::new(),
            done: false,
        }
    }

    /// Consumes the iterator and returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> Iterator for LogJsonlReader<R> {
    type Item = LogLineRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.buffer.clear();
            let line_number = self.line_number.saturating_add(1);

            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {
                    self.line_number = line_number;
                    if self.buffer.ends_with('\n') {
                        self.buffer.pop();
                    }

                    match self.parser.parse_line(&self.buffer) {
                        Ok(None) => continue,
                        Ok(Some(line)) => {
                            return Some(LogLineRecord {
                                line_number,
                                outcome: Ok(line),
                            });
                        }
                        Err(err) => {
                            return Some(LogLineRecord {
                                line_number,
                                outcome: Err(err),
                            });
                        }
                    }
                }
                Err(err) => {
                    self.done = true;
                    self.line_number = line_number;
                    return Some(LogLineRecord {
                        line_number,
                        outcome: Err(LogParseError::Io(err)),
                    });
                }
            }
        }
    }
}

pub type LogJsonlFileReader = LogJsonlReader<std::io::BufReader<std::fs::File>>;

/// Convenience constructor for reader-backed parsing.
pub fn log_jsonl_reader<R: BufRead>(reader: R) -> LogJsonlReader<R> {
    LogJsonlReader::new(reader)
}

/// Convenience constructor for file-backed parsing.
pub fn log_jsonl_file(path: impl AsRef<Path>) -> Result<LogJsonlFileReader, LogParseError> {
    let file = std::fs::File::open(path.as_ref())?;
    Ok(LogJsonlReader::new(std::io::BufReader::new(file)))
}

#[cfg(feature = "tokio")]
pub use tokio_jsonl::AsyncLogJsonlReader;

#[cfg(feature = "tokio")]
mod tokio_jsonl {
    use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

    use super::{LogLineParser, LogLineRecord, LogParseError};

    /// Async counterpart of [`super::LogJsonlReader`] for callers already
    /// on tokio (tailing a dump while a run is in flight).
    pub struct AsyncLogJsonlReader<R: AsyncBufRead + Unpin> {
        reader: R,
        parser: LogLineParser,
        line_number: usize,
        buffer: String,
        done: bool,
    }

    impl<R: AsyncBufRead + Unpin> AsyncLogJsonlReader<R> {
        pub fn new(reader: R) -> Self {
            Self {
                reader,
                parser: LogLineParser::new(),
                line_number: 0,
                buffer: String::new(),
                done: false,
            }
        }

        /// Yields the next per-line record, or `None` at end of stream.
        pub async fn next_record(&mut self) -> Option<LogLineRecord> {
            if self.done {
                return None;
            }

            loop {
                self.buffer.clear();
                let line_number = self.line_number.saturating_add(1);

                match self.reader.read_line(&mut self.buffer).await {
                    Ok(0) => {
                        self.done = true;
                        return None;
                    }
                    Ok(_) => {
                        self.line_number = line_number;
                        if self.buffer.ends_with('\n') {
                            self.buffer.pop();
                        }

                        match self.parser.parse_line(&self.buffer) {
                            Ok(None) => continue,
                            Ok(Some(line)) => {
                                return Some(LogLineRecord {
                                    line_number,
                                    outcome: Ok(line),
                                });
                            }
                            Err(err) => {
                                return Some(LogLineRecord {
                                    line_number,
                                    outcome: Err(err),
                                });
                            }
                        }
                    }
                    Err(err) => {
                        self.done = true;
                        self.line_number = line_number;
                        return Some(LogLineRecord {
                            line_number,
                            outcome: Err(LogParseError::Io(err)),
                        });
                    }
                }
            }
        }
    }

    impl<R: tokio::io::AsyncRead + Unpin> AsyncLogJsonlReader<BufReader<R>> {
        /// Wraps any async reader in a buffered line reader.
        pub fn from_unbuffered(reader: R) -> Self {
            Self::new(BufReader::new(reader))
        }
    }
}
