//! Dynamic-phase normalization for merge runs.
//!
//! The step set is not declared anywhere; it is discovered from the log
//! stream in first-seen phase order. Status flows through the marker state
//! machine in `tasklog`, then two corrective passes run:
//! - a backward pass promotes earlier phases that a later phase already
//!   superseded (a phase transition implies the prior phase finished even
//!   when its completion marker was missed),
//! - a failed terminal status pins the last started phase to failed.
//!
//! ERROR-level lines are advisory here: only an explicit `阶段失败` marker
//! or the overall terminal status flips a step to failed. Incidental
//! error-level logging (a retried sub-operation that ultimately succeeded)
//! must not produce false positives.
//!
//! The log view trusts input order as timestamp order: the backend serves
//! lines already sorted, so this adapter only filters and never re-sorts.
//! Timestamps gate the skew filter, not ordering.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tasklog::{
    detect_phase_events, parse_timestamp, LogLevel, PhaseEvent, PhaseFsm, RawLogLine,
    RawTaskDescriptor, TaskStatus,
};
use tracing::debug;

use crate::adapter::base_run;
use crate::labels::phase_label;
use crate::run::{NormalizedRun, RunLogEntry, Step};
use crate::{RunContext, TaskKind};

#[derive(Debug, Default)]
struct PhaseTrack {
    state: PhaseFsm,
    started: bool,
    error_lines: usize,
}

pub(crate) fn normalize(
    ctx: &RunContext,
    task: &RawTaskDescriptor,
    logs: &[RawLogLine],
) -> NormalizedRun {
    let mut order: Vec<String> = Vec::new();
    let mut tracks: HashMap<String, PhaseTrack> = HashMap::new();

    let started_at = task.started_at.as_deref().and_then(parse_timestamp);
    let cutoff = started_at.map(|start| {
        // A tolerance beyond chrono's range falls back to the 1 s default
        // rather than truncating into nonsense.
        let skew = chrono::Duration::from_std(ctx.clock_skew_tolerance)
            .unwrap_or_else(|_| chrono::Duration::seconds(1));
        start - skew
    });

    let mut entries: Vec<RunLogEntry> = Vec::new();
    for line in logs {
        let phase = line
            .phase
            .clone()
            .unwrap_or_else(|| ctx.default_phase.clone());

        let track = match tracks.entry(phase.clone()) {
            Entry::Vacant(slot) => {
                order.push(phase.clone());
                slot.insert(PhaseTrack::default())
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };

        for event in detect_phase_events(&line.message) {
            if event == PhaseEvent::Started {
                track.started = true;
            }
            track.state = track.state.apply(event);
        }

        let level = line
            .level
            .as_deref()
            .map(LogLevel::normalize)
            .unwrap_or_default();
        if level == LogLevel::Error {
            track.error_lines += 1;
        }

        if line_predates_run(line, cutoff) {
            debug!(%phase, ts = line.timestamp.as_deref(), "dropping log line from before run start");
            continue;
        }
        entries.push(RunLogEntry::from_raw(line, Some(phase.as_str())));
    }

    // Backward pass: the last phase still running is the active one; any
    // running phase before it was superseded and counts as finished.
    let mut seen_active = false;
    for key in order.iter().rev() {
        if let Some(track) = tracks.get_mut(key) {
            if track.state == PhaseFsm::Running {
                if seen_active {
                    track.state = PhaseFsm::Success;
                } else {
                    seen_active = true;
                }
            }
        }
    }

    // Terminal override: an overall failure lands on the last phase that
    // actually started; earlier phases keep their promoted statuses.
    if TaskStatus::of(task).is_terminal_failure() {
        let target = order
            .iter()
            .rev()
            .find(|key| tracks.get(key.as_str()).is_some_and(|track| track.started))
            .or_else(|| order.last())
            .cloned();
        if let Some(key) = target {
            if let Some(track) = tracks.get_mut(&key) {
                track.state = PhaseFsm::Failed;
            }
        }
    }

    let mut run = base_run(TaskKind::Merge, task);
    run.steps = order
        .iter()
        .filter_map(|key| {
            let track = tracks.get(key)?;
            if track.error_lines > 0 {
                debug!(
                    phase = %key,
                    error_lines = track.error_lines,
                    "error-level lines observed; advisory only"
                );
            }
            Some(Step {
                id: key.clone(),
                name: phase_label(ctx, key),
                status: track.state.into(),
            })
        })
        .collect();
    run.logs = entries;
    run
}

/// True when the line's timestamp predates the run start by more than the
/// skew tolerance. Unparsable or absent timestamps always keep the line.
fn line_predates_run(line: &RawLogLine, cutoff: Option<DateTime<Utc>>) -> bool {
    let Some(cutoff) = cutoff else {
        return false;
    };
    match line.timestamp.as_deref().and_then(parse_timestamp) {
        Some(ts) => ts < cutoff,
        None => false,
    }
}
