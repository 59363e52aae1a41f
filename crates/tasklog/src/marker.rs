//! Phase-marker detection and the per-phase status state machine.
//!
//! Backend messages embed textual markers rather than structured status
//! fields: `开始阶段` (phase started), `阶段完成` (phase completed),
//! `阶段失败` (phase failed). Detection stays a set of substring tests, but
//! the status updates they trigger go through an explicit transition table
//! so the precedence rules hold independently of message phrasing.

/// A status event carried by a log message.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PhaseEvent {
    Started,
    Completed,
    Failed,
}

/// Extracts the events carried by one message, in application order.
///
/// A single line can carry several markers (`开始连接测试...完成`); the
/// returned order `Started, Completed, Failed` plus the absorbing `Failed`
/// state guarantee that a failure marker wins over a completion marker in
/// the same line, wherever the two substrings appear.
pub fn detect_phase_events(message: &str) -> Vec<PhaseEvent> {
    let mut events = Vec::new();
    if message.contains("开始阶段") || message.starts_with("开始") {
        events.push(PhaseEvent::Started);
    }
    if message.contains("阶段完成") || message.contains("完成") {
        events.push(PhaseEvent::Completed);
    }
    if message.contains("阶段失败") {
        events.push(PhaseEvent::Failed);
    }
    events
}

/// Per-phase status machine.
///
/// Transition table (state × event → state), `Failed` absorbing:
///
/// | state   | Started | Completed | Failed |
/// |---------|---------|-----------|--------|
/// | Pending | Running | Success   | Failed |
/// | Running | Running | Success   | Failed |
/// | Success | Running | Success   | Failed |
/// | Failed  | Failed  | Failed    | Failed |
///
/// `Success × Started → Running` mirrors the backend's retry behavior: a
/// phase that logs a fresh start after completing is running again.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum PhaseFsm {
    #[default]
    Pending,
    Running,
    Success,
    Failed,
}

impl PhaseFsm {
    pub fn apply(self, event: PhaseEvent) -> Self {
        match (self, event) {
            (Self::Failed, _) => Self::Failed,
            (_, PhaseEvent::Failed) => Self::Failed,
            (_, PhaseEvent::Completed) => Self::Success,
            (_, PhaseEvent::Started) => Self::Running,
        }
    }

    /// Folds every event from one message into the state.
    pub fn apply_message(self, message: &str) -> Self {
        detect_phase_events(message)
            .into_iter()
            .fold(self, Self::apply)
    }
}
