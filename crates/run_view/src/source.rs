use std::collections::HashMap;

use tasklog::{RawLogLine, RawTaskDescriptor};
use thiserror::Error;
use tracing::warn;

/// Failure reaching the task/log backend.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("task {task_id} not found")]
    TaskNotFound { task_id: String },
    #[error("backend request failed: {0}")]
    Backend(String),
}

/// Boundary to whatever serves task descriptors and raw logs.
///
/// HTTP implementations live with the caller; normalization itself never
/// performs I/O. Implementations should return their own snapshot per call
/// so concurrent normalizations stay independent.
pub trait TaskSource {
    fn get_task(&self, task_id: &str) -> Result<RawTaskDescriptor, SourceError>;
    fn get_logs(
        &self,
        task_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<RawLogLine>, SourceError>;
}

/// One task's inputs, captured before normalization begins so repeated or
/// overlapping calls for the same task id stay independently consistent.
#[derive(Debug, Clone, Default)]
pub struct RunSnapshot {
    pub task: RawTaskDescriptor,
    pub logs: Vec<RawLogLine>,
}

/// Captures a snapshot, absorbing fetch failures instead of propagating
/// them: a failed log fetch yields an empty log list, a failed task fetch
/// yields a default descriptor. The normalizer is then invoked with
/// whatever partial data survived.
pub fn fetch_snapshot<S: TaskSource>(
    source: &S,
    task_id: &str,
    limit: Option<usize>,
) -> RunSnapshot {
    let task = match source.get_task(task_id) {
        Ok(task) => task,
        Err(err) => {
            warn!(%task_id, error = %err, "task fetch failed; normalizing with defaults");
            RawTaskDescriptor::default()
        }
    };
    let logs = match source.get_logs(task_id, limit) {
        Ok(logs) => logs,
        Err(err) => {
            warn!(%task_id, error = %err, "log fetch failed; normalizing with empty log list");
            Vec::new()
        }
    };
    RunSnapshot { task, logs }
}

/// Map-backed source for tests and offline fixtures.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tasks: HashMap<String, RawTaskDescriptor>,
    logs: HashMap<String, Vec<RawLogLine>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_task(&mut self, task_id: impl Into<String>, task: RawTaskDescriptor) {
        self.tasks.insert(task_id.into(), task);
    }

    pub fn insert_logs(&mut self, task_id: impl Into<String>, logs: Vec<RawLogLine>) {
        self.logs.insert(task_id.into(), logs);
    }
}

impl TaskSource for InMemorySource {
    fn get_task(&self, task_id: &str) -> Result<RawTaskDescriptor, SourceError> {
        self.tasks
            .get(task_id)
            .cloned()
            .ok_or_else(|| SourceError::TaskNotFound {
                task_id: task_id.to_string(),
            })
    }

    fn get_logs(
        &self,
        task_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<RawLogLine>, SourceError> {
        let mut logs = self.logs.get(task_id).cloned().unwrap_or_default();
        if let Some(limit) = limit {
            logs.truncate(limit);
        }
        Ok(logs)
    }
}
