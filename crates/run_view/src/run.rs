use serde::Serialize;
use tasklog::{LogLevel, PhaseFsm, RawLogLine};

/// Status of one UI-facing step.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Running,
    Success,
    Failed,
    Skipped,
    Cancelled,
}

impl From<PhaseFsm> for StepStatus {
    fn from(state: PhaseFsm) -> Self {
        match state {
            PhaseFsm::Pending => Self::Pending,
            PhaseFsm::Running => Self::Running,
            PhaseFsm::Success => Self::Success,
            PhaseFsm::Failed => Self::Failed,
        }
    }
}

/// One unit of progress in the run view.
///
/// Steps carry no identity across normalization calls; every call rebuilds
/// them from scratch.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Step {
    /// Phase key (dynamic discovery) or fixed pipeline id.
    pub id: String,
    pub name: String,
    pub status: StepStatus,
}

/// One flattened, leveled log entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunLogEntry {
    pub ts: Option<String>,
    pub level: LogLevel,
    pub source: Option<String>,
    pub message: String,
    pub step_id: Option<String>,
}

impl RunLogEntry {
    /// Lifts a raw line into the view, normalizing its level and attaching
    /// the step it belongs to. The raw timestamp string passes through
    /// verbatim; parsing only ever gates filtering, not display.
    pub fn from_raw(line: &RawLogLine, step_id: Option<&str>) -> Self {
        Self {
            ts: line.timestamp.clone(),
            level: line
                .level
                .as_deref()
                .map(LogLevel::normalize)
                .unwrap_or_default(),
            source: line.source.clone(),
            message: line.message.clone(),
            step_id: step_id.map(str::to_string),
        }
    }
}

/// Overall status of a run.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Running,
    Success,
    Failed,
}

impl RunStatus {
    /// Collapses the backend vocabulary; unknown tokens read as running.
    pub fn from_task(status: tasklog::TaskStatus) -> Self {
        use tasklog::TaskStatus;
        match status {
            TaskStatus::Pending => Self::Pending,
            TaskStatus::Completed | TaskStatus::Success => Self::Success,
            TaskStatus::Failed | TaskStatus::Error => Self::Failed,
            TaskStatus::Running | TaskStatus::Unknown => Self::Running,
        }
    }
}

/// Renderer-ready view of one task run. Transient: no lifecycle beyond the
/// call that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRun {
    pub title: String,
    pub status: RunStatus,
    pub progress: Option<f64>,
    pub current_operation: Option<String>,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
    pub steps: Vec<Step>,
    pub logs: Vec<RunLogEntry>,
}
