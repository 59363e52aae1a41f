#![forbid(unsafe_code)]
//! Raw task/log primitives for Hive small-file and cold-data task runs.
//!
//! The platform backend emits heterogeneous, duck-typed log shapes (field
//! spellings and vocabularies vary by task type). This crate resolves all of
//! that at the boundary:
//! - Serde models with field aliases ([`RawLogLine`], [`RawTaskDescriptor`]).
//! - Severity normalization into the four renderer levels ([`LogLevel`]).
//! - Tolerant ISO-ish timestamp parsing ([`parse_timestamp`]) that returns
//!   `None` instead of failing.
//! - The phase-marker state machine ([`PhaseFsm`]) driven by the textual
//!   markers embedded in backend messages (`开始阶段` / `阶段完成` /
//!   `阶段失败`).
//! - A line-oriented reader for raw log dumps ([`LogJsonlReader`]) that
//!   degrades non-JSON lines to message-only records rather than dropping
//!   or erroring on them.
//!
//! Downstream, `run_view` consumes these types to build normalized run
//! views; this crate performs no status inference of its own beyond the
//! per-phase transition table.

mod error;
mod jsonl;
mod level;
mod marker;
mod record;
mod timestamp;

pub use error::LogParseError;
pub use jsonl::{
    log_jsonl_file, log_jsonl_reader, LogJsonlFileReader, LogJsonlReader, LogLineParser,
    LogLineRecord,
};
pub use level::LogLevel;
pub use marker::{detect_phase_events, PhaseEvent, PhaseFsm};
pub use record::{RawLogLine, RawTaskDescriptor, TaskStatus};
pub use timestamp::parse_timestamp;

#[cfg(feature = "tokio")]
pub use jsonl::AsyncLogJsonlReader;
