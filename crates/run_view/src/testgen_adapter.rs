//! Fixed multi-step normalization for synthetic test-table generation.
//!
//! The generator declares its pipeline up front and reports a
//! `current_phase` id. The active step resolves through a fallback chain:
//! the declared id when it is known, else the phase of the most recent log
//! line matching a known id, else the first step. Unlike merge runs, an
//! ERROR-level line folds into the overall status here (the generator never
//! retries), so error presence plus a non-success terminal status reads as
//! failed.

use tasklog::{LogLevel, RawLogLine, RawTaskDescriptor, TaskStatus};
use tracing::debug;

use crate::adapter::base_run;
use crate::labels::phase_label;
use crate::run::{NormalizedRun, RunLogEntry, RunStatus, Step, StepStatus};
use crate::{RunContext, TaskKind};

const PIPELINE: [&str; 7] = [
    "initialization",
    "hdfs_setup",
    "hive_table_creation",
    "partition_creation",
    "data_generation",
    "verification",
    "completed",
];

fn pipeline_index(phase: &str) -> Option<usize> {
    PIPELINE.iter().position(|id| *id == phase)
}

pub(crate) fn normalize(
    ctx: &RunContext,
    task: &RawTaskDescriptor,
    logs: &[RawLogLine],
) -> NormalizedRun {
    let declared = task.current_phase.as_deref().and_then(pipeline_index);
    let from_logs = logs
        .iter()
        .rev()
        .find_map(|line| line.phase.as_deref().and_then(pipeline_index));
    let active = declared.or(from_logs);
    if declared.is_none() {
        debug!(
            current_phase = task.current_phase.as_deref(),
            fallback = from_logs,
            "declared phase unknown; falling back"
        );
    }

    let status = TaskStatus::of(task);
    let has_error_line = logs.iter().any(|line| {
        line.level
            .as_deref()
            .map(LogLevel::normalize)
            .unwrap_or_default()
            == LogLevel::Error
    });
    let overall = if status.is_terminal_success() {
        RunStatus::Success
    } else if status.is_terminal_failure() || has_error_line {
        RunStatus::Failed
    } else {
        RunStatus::Running
    };

    let step_status = |index: usize| -> StepStatus {
        match overall {
            RunStatus::Success => StepStatus::Success,
            RunStatus::Failed => {
                let pivot = active.unwrap_or(0);
                match index.cmp(&pivot) {
                    std::cmp::Ordering::Less => StepStatus::Success,
                    std::cmp::Ordering::Equal => StepStatus::Failed,
                    std::cmp::Ordering::Greater => StepStatus::Pending,
                }
            }
            _ => {
                let pivot = active.unwrap_or(0);
                match index.cmp(&pivot) {
                    std::cmp::Ordering::Less => StepStatus::Success,
                    std::cmp::Ordering::Equal => StepStatus::Running,
                    std::cmp::Ordering::Greater => StepStatus::Pending,
                }
            }
        }
    };

    let mut run = base_run(TaskKind::TestTable, task);
    run.status = overall;
    run.steps = PIPELINE
        .iter()
        .enumerate()
        .map(|(index, id)| Step {
            id: (*id).to_string(),
            name: phase_label(ctx, id),
            status: step_status(index),
        })
        .collect();
    run.logs = logs
        .iter()
        .map(|line| {
            let step_id = line
                .phase
                .as_deref()
                .filter(|phase| pipeline_index(phase).is_some());
            let mut entry = RunLogEntry::from_raw(line, step_id);
            entry.message = augmented_message(line);
            entry
        })
        .collect();
    run
}

/// Appends the structured `details` payload to the message, stringified
/// when it is not already a string.
fn augmented_message(line: &RawLogLine) -> String {
    match &line.details {
        None => line.message.clone(),
        Some(serde_json::Value::String(text)) => format!("{} | {}", line.message, text),
        Some(other) => format!("{} | {}", line.message, other),
    }
}
