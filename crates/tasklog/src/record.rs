use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One raw log line as emitted by the backend.
///
/// Field spellings vary by task type (`level` vs `log_level`, `timestamp`
/// vs `time`); serde aliases resolve them here so everything past this
/// struct sees a single shape. Every field is optional or defaultable —
/// a malformed line still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLogLine {
    #[serde(default, alias = "time", alias = "ts")]
    pub timestamp: Option<String>,
    #[serde(default, alias = "log_level", alias = "severity")]
    pub level: Option<String>,
    #[serde(default, alias = "msg", alias = "content")]
    pub message: String,
    #[serde(default, alias = "stage", alias = "category")]
    pub phase: Option<String>,
    #[serde(default, alias = "component")]
    pub source: Option<String>,
    /// Optional structured payload; test-table generation appends it to the
    /// rendered message.
    #[serde(default)]
    pub details: Option<Value>,
}

impl RawLogLine {
    /// Wraps a plain-text dump line as a message-only record.
    pub fn from_text(line: &str) -> Self {
        Self {
            message: line.to_string(),
            ..Self::default()
        }
    }
}

/// The backend's own view of one task, passed through mostly verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTaskDescriptor {
    #[serde(default, alias = "state", alias = "task_status")]
    pub status: Option<String>,
    #[serde(default, alias = "start_time")]
    pub started_at: Option<String>,
    #[serde(default, alias = "end_time", alias = "finish_time")]
    pub finished_at: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default, alias = "operation")]
    pub current_operation: Option<String>,
    #[serde(default, alias = "phase")]
    pub current_phase: Option<String>,
    #[serde(default, alias = "task_name", alias = "title")]
    pub name: Option<String>,
}

/// Task status vocabulary, normalized case-insensitively.
///
/// The vocabulary varies by task type; any token outside it maps to
/// [`TaskStatus::Unknown`], which adapters treat as the running/pending
/// default branch.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Success,
    Failed,
    Error,
    Unknown,
}

impl TaskStatus {
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "completed" => Self::Completed,
            "success" => Self::Success,
            "failed" => Self::Failed,
            "error" => Self::Error,
            _ => Self::Unknown,
        }
    }

    /// Status carried by a descriptor; a missing field reads as
    /// [`TaskStatus::Unknown`].
    pub fn of(task: &RawTaskDescriptor) -> Self {
        task.status
            .as_deref()
            .map(Self::parse)
            .unwrap_or(Self::Unknown)
    }

    pub fn is_terminal_success(self) -> bool {
        matches!(self, Self::Completed | Self::Success)
    }

    pub fn is_terminal_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Error)
    }
}
