use tasklog::{RawLogLine, RawTaskDescriptor, TaskStatus};

use crate::run::{NormalizedRun, RunStatus};
use crate::{fixed_adapter, merge_adapter, testgen_adapter, RunContext};

/// Task families recognized by the normalizer.
///
/// Resolved once at the boundary; each variant has its own adapter, so the
/// duck-typed backend shapes and vocabularies never leak past this enum.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TaskKind {
    /// Small-file merge run; phases discovered from the log stream.
    Merge,
    /// Cold-data scan; fixed `init / scan / summary` pipeline.
    Scan,
    /// Cold-data archive; fixed `prepare / archive / finalize` pipeline.
    Archive,
    /// Synthetic test-table generation; fixed 7-step pipeline with
    /// declared phase ids.
    TestTable,
}

impl TaskKind {
    /// Title used when the descriptor carries no name.
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Merge => "小文件合并",
            Self::Scan => "冷数据扫描",
            Self::Archive => "数据归档",
            Self::TestTable => "测试表生成",
        }
    }
}

/// Normalizes one task snapshot into a renderer-ready run view.
///
/// Pure: both inputs are snapshots the caller captured before the call, and
/// the output carries no identity across calls. Never fails — malformed
/// input degrades to safe defaults per field.
pub fn normalize_run(
    kind: TaskKind,
    ctx: &RunContext,
    task: &RawTaskDescriptor,
    logs: &[RawLogLine],
) -> NormalizedRun {
    match kind {
        TaskKind::Merge => merge_adapter::normalize(ctx, task, logs),
        TaskKind::Scan | TaskKind::Archive => fixed_adapter::normalize(kind, ctx, task, logs),
        TaskKind::TestTable => testgen_adapter::normalize(ctx, task, logs),
    }
}

/// Run scaffold shared by the adapters: descriptor passthrough fields plus
/// the collapsed overall status. Steps and logs start empty.
pub(crate) fn base_run(kind: TaskKind, task: &RawTaskDescriptor) -> NormalizedRun {
    NormalizedRun {
        title: task
            .name
            .clone()
            .unwrap_or_else(|| kind.default_title().to_string()),
        status: RunStatus::from_task(TaskStatus::of(task)),
        progress: task.progress,
        current_operation: task.current_operation.clone(),
        started_at: task.started_at.clone(),
        finished_at: task.finished_at.clone(),
        steps: Vec::new(),
        logs: Vec::new(),
    }
}
