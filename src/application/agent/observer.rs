use super::decision::Decision;
use super::transcript::Observation;

/// Hook points the loop reports to after each state transition. All
/// methods default to no-ops, so the core stays console-free and front
/// ends subscribe to exactly what they narrate.
pub trait AgentObserver: Send + Sync {
    fn on_iteration(&self, _iteration: usize) {}
    fn on_prompt(&self, _prompt: &str) {}
    fn on_raw_response(&self, _raw: &str) {}
    fn on_decision(&self, _decision: &Decision) {}
    fn on_observation(&self, _observation: &Observation) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl AgentObserver for NullObserver {}
