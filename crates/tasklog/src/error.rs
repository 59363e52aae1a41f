use thiserror::Error;

/// Failure classifying one raw log-dump line.
///
/// These surface per line through [`crate::LogLineRecord`]; a bad line never
/// aborts the surrounding read.
#[derive(Debug, Error)]
pub enum LogParseError {
    #[error("failed reading log dump: {0}")]
    Io(#[from] std::io::Error),
    #[error("log line {line_number} is JSON but not an object")]
    NotAnObject { line_number: usize },
    #[error("log line {line_number}: {source}")]
    Shape {
        line_number: usize,
        source: serde_json::Error,
    },
}
