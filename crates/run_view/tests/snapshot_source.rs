use run_view::{
    fetch_snapshot, normalize_run, InMemorySource, RunContext, RunStatus, SourceError,
    StepStatus, TaskKind, TaskSource,
};
use tasklog::{RawLogLine, RawTaskDescriptor};

/// Source whose log endpoint is down.
struct BrokenLogs(InMemorySource);

impl TaskSource for BrokenLogs {
    fn get_task(&self, task_id: &str) -> Result<RawTaskDescriptor, SourceError> {
        self.0.get_task(task_id)
    }

    fn get_logs(
        &self,
        _task_id: &str,
        _limit: Option<usize>,
    ) -> Result<Vec<RawLogLine>, SourceError> {
        Err(SourceError::Backend("log endpoint 503".to_string()))
    }
}

fn seeded() -> InMemorySource {
    let mut source = InMemorySource::new();
    source.insert_task(
        "merge-42",
        RawTaskDescriptor {
            status: Some("running".to_string()),
            name: Some("ods_orders 合并".to_string()),
            ..RawTaskDescriptor::default()
        },
    );
    source.insert_logs(
        "merge-42",
        vec![
            RawLogLine {
                message: "开始阶段".to_string(),
                phase: Some("connection_test".to_string()),
                ..RawLogLine::default()
            },
            RawLogLine {
                message: "阶段完成".to_string(),
                phase: Some("connection_test".to_string()),
                ..RawLogLine::default()
            },
            RawLogLine {
                message: "开始阶段".to_string(),
                phase: Some("data_merge".to_string()),
                ..RawLogLine::default()
            },
        ],
    );
    source
}

#[test]
fn snapshot_then_normalize_end_to_end() {
    let ctx = RunContext::default();
    let snapshot = fetch_snapshot(&seeded(), "merge-42", None);
    let run = normalize_run(TaskKind::Merge, &ctx, &snapshot.task, &snapshot.logs);

    assert_eq!(run.title, "ods_orders 合并");
    assert_eq!(run.status, RunStatus::Running);
    assert_eq!(run.steps[0].status, StepStatus::Success);
    assert_eq!(run.steps[1].status, StepStatus::Running);
    assert_eq!(run.logs.len(), 3);
}

#[test]
fn log_fetch_failure_degrades_to_an_empty_list() {
    let ctx = RunContext::default();
    let snapshot = fetch_snapshot(&BrokenLogs(seeded()), "merge-42", None);

    assert_eq!(snapshot.task.status.as_deref(), Some("running"));
    assert!(snapshot.logs.is_empty());

    // Normalization still proceeds on the partial snapshot.
    let run = normalize_run(TaskKind::Merge, &ctx, &snapshot.task, &snapshot.logs);
    assert!(run.steps.is_empty());
    assert_eq!(run.status, RunStatus::Running);
}

#[test]
fn unknown_task_degrades_to_a_default_descriptor() {
    let snapshot = fetch_snapshot(&seeded(), "no-such-task", None);
    assert_eq!(snapshot.task, RawTaskDescriptor::default());
    assert!(snapshot.logs.is_empty());
}

#[test]
fn log_limit_truncates_from_the_front() {
    let snapshot = fetch_snapshot(&seeded(), "merge-42", Some(2));
    assert_eq!(snapshot.logs.len(), 2);
    assert_eq!(snapshot.logs[1].message, "阶段完成");
}

#[test]
fn repeated_snapshots_normalize_identically() {
    let ctx = RunContext::default();
    let source = seeded();
    let first = fetch_snapshot(&source, "merge-42", None);
    let second = fetch_snapshot(&source, "merge-42", None);

    assert_eq!(
        normalize_run(TaskKind::Merge, &ctx, &first.task, &first.logs),
        normalize_run(TaskKind::Merge, &ctx, &second.task, &second.logs)
    );
}
