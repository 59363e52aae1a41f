use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized severity of a log line.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    #[default]
    Info,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    /// Maps a free-text severity token onto the four renderer levels.
    ///
    /// The comparison is an exact-token, case-insensitive match: `"warn"`
    /// and `"WARN"` both map to [`LogLevel::Warn`], but `"Warning"` does
    /// not — like every other unrecognized token it falls back to
    /// [`LogLevel::Info`]. Renderers key styling off these four values, so
    /// the strict compare is kept rather than loosened to a substring
    /// match.
    pub fn normalize(token: &str) -> Self {
        match token.trim().to_ascii_uppercase().as_str() {
            "INFO" => Self::Info,
            "WARN" => Self::Warn,
            "ERROR" => Self::Error,
            "DEBUG" => Self::Debug,
            _ => Self::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_tokens_normalize_case_insensitively() {
        assert_eq!(LogLevel::normalize("warn"), LogLevel::Warn);
        assert_eq!(LogLevel::normalize("WARN"), LogLevel::Warn);
        assert_eq!(LogLevel::normalize(" Warn "), LogLevel::Warn);
        assert_eq!(LogLevel::normalize("error"), LogLevel::Error);
        assert_eq!(LogLevel::normalize("Debug"), LogLevel::Debug);
        assert_eq!(LogLevel::normalize("info"), LogLevel::Info);
    }

    #[test]
    fn non_exact_tokens_fall_back_to_info() {
        assert_eq!(LogLevel::normalize("Warning"), LogLevel::Info);
        assert_eq!(LogLevel::normalize("ERR"), LogLevel::Info);
        assert_eq!(LogLevel::normalize("fatal"), LogLevel::Info);
        assert_eq!(LogLevel::normalize(""), LogLevel::Info);
    }
}
