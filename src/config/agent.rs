use std::time::Duration;

use serde::Deserialize;

use crate::infrastructure::model::RetryPolicy;

/// Raw `[agent]` table as read from TOML.
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawAgent {
    pub max_iterations: Option<usize>,
    pub max_parse_failures: Option<usize>,
    pub step_delay_ms: Option<u64>,
    pub retry: Option<RetryPolicy>,
}

/// Validated agent loop settings.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Maximum tool dispatches per query before the run is capped.
    pub max_iterations: usize,
    /// Consecutive protocol violations tolerated before the run fails.
    pub max_parse_failures: usize,
    /// Optional pause inserted before each model and tool call.
    pub step_delay: Option<Duration>,
    pub retry: RetryPolicy,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            max_parse_failures: 3,
            step_delay: None,
            retry: RetryPolicy::default(),
        }
    }
}
