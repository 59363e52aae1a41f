//! Fixed 3-step normalization for scan and archive runs.
//!
//! These runs report no per-phase markers, only a terminal status, so the
//! pipeline is hardcoded and the middle (work) step carries the outcome.
//! Unlike merge runs, an ERROR-level line here is authoritative: the scan
//! driver logs errors exactly once, on the failure path, so any such line
//! forces the work step to failed even when the terminal status claims
//! completion. No timestamp filtering either — these task ids are never
//! reused.

use tasklog::{LogLevel, RawLogLine, RawTaskDescriptor, TaskStatus};
use tracing::warn;

use crate::adapter::base_run;
use crate::labels::phase_label;
use crate::run::{NormalizedRun, RunLogEntry, Step, StepStatus};
use crate::{RunContext, TaskKind};

const SCAN_STEPS: [&str; 3] = ["init", "scan", "summary"];
const ARCHIVE_STEPS: [&str; 3] = ["prepare", "archive", "finalize"];

pub(crate) fn normalize(
    kind: TaskKind,
    ctx: &RunContext,
    task: &RawTaskDescriptor,
    logs: &[RawLogLine],
) -> NormalizedRun {
    let ids = match kind {
        TaskKind::Archive => ARCHIVE_STEPS,
        _ => SCAN_STEPS,
    };

    // By the time a run is visible the first step has already happened.
    let mut statuses = [StepStatus::Success, StepStatus::Running, StepStatus::Pending];
    let status = TaskStatus::of(task);
    if status.is_terminal_success() {
        statuses[1] = StepStatus::Success;
        statuses[2] = StepStatus::Success;
    } else if status.is_terminal_failure() {
        statuses[1] = StepStatus::Failed;
        statuses[2] = StepStatus::Failed;
    }

    let has_error_line = logs.iter().any(|line| {
        line.level
            .as_deref()
            .map(LogLevel::normalize)
            .unwrap_or_default()
            == LogLevel::Error
    });
    if has_error_line {
        if statuses[1] != StepStatus::Failed {
            warn!(?kind, "error-level log overrides terminal status; marking work step failed");
        }
        statuses[1] = StepStatus::Failed;
    }

    let mut run = base_run(kind, task);
    run.steps = ids
        .iter()
        .zip(statuses)
        .map(|(id, status)| Step {
            id: (*id).to_string(),
            name: phase_label(ctx, id),
            status,
        })
        .collect();
    run.logs = logs
        .iter()
        .map(|line| {
            let step_id = line
                .phase
                .as_deref()
                .filter(|phase| ids.contains(phase));
            RunLogEntry::from_raw(line, step_id)
        })
        .collect();
    run
}
