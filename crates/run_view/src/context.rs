use std::collections::HashMap;
use std::time::Duration;

/// Shared normalization configuration.
///
/// Constructed once at application start, passed by reference into every
/// normalization call, dropped at shutdown. There is deliberately no global
/// instance; callers that need per-cluster overrides build one context per
/// cluster.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Phase key → display label overrides, consulted before the built-in
    /// table and the snake_case fallback.
    pub labels: HashMap<String, String>,
    /// Lines timestamped earlier than `started_at` minus this tolerance are
    /// dropped during dynamic-phase normalization (leftovers from a prior
    /// run sharing the task id). Fixed pipelines keep every line.
    pub clock_skew_tolerance: Duration,
    /// Phase attributed to log lines that carry none.
    pub default_phase: String,
}

impl Default for RunContext {
    fn default() -> Self {
        Self {
            labels: HashMap::new(),
            clock_skew_tolerance: Duration::from_secs(1),
            default_phase: "执行".to_string(),
        }
    }
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one label override.
    pub fn with_label(mut self, phase: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(phase.into(), label.into());
        self
    }
}
