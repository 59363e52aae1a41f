#![forbid(unsafe_code)]
//! Normalized run views for Hive small-file / cold-data task runs.
//!
//! Turns an opaque backend status plus an unordered, partial log stream into
//! a renderer-ready view: an ordered step list with inferred statuses and a
//! flattened, leveled log list. Three task families exist, differing in how
//! the step set is determined:
//! - merge runs discover phases dynamically from the log stream
//!   ([`TaskKind::Merge`]),
//! - scan and archive runs follow a fixed 3-step pipeline
//!   ([`TaskKind::Scan`] / [`TaskKind::Archive`]),
//! - synthetic test-table generation follows a fixed 7-step pipeline with
//!   declared phase ids ([`TaskKind::TestTable`]).
//!
//! Normalization is a pure function of its two snapshots
//! ([`tasklog::RawTaskDescriptor`], `&[tasklog::RawLogLine]`): no I/O, no
//! shared state, every call rebuilds steps from scratch. Fetching the
//! snapshots lives behind [`TaskSource`]; [`fetch_snapshot`] degrades fetch
//! failures to empty inputs instead of propagating them.

mod adapter;
mod context;
mod fixed_adapter;
mod labels;
mod merge_adapter;
mod run;
mod source;
mod testgen_adapter;

pub use adapter::{normalize_run, TaskKind};
pub use context::RunContext;
pub use labels::phase_label;
pub use run::{NormalizedRun, RunLogEntry, RunStatus, Step, StepStatus};
pub use source::{fetch_snapshot, InMemorySource, RunSnapshot, SourceError, TaskSource};
