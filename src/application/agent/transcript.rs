use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::decision::Decision;

/// Result of acting on one decision, as reported back to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Observation {
    /// The tool ran and returned a result.
    Success { tool: String, result: Value },
    /// The tool ran and reported an error.
    Failure { tool: String, error: String },
    /// Synthetic observation for a protocol violation; no tool was involved.
    Protocol { error: String },
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { tool, result } => {
                write!(f, "Tool '{tool}' returned: {result}")
            }
            Self::Failure { tool, error } => {
                write!(f, "Error executing tool '{tool}': {error}")
            }
            Self::Protocol { error } => write!(f, "Error: {error}"),
        }
    }
}

/// One record in the run history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptEntry {
    /// A dispatched action and what it produced.
    Step {
        decision: Decision,
        observation: Observation,
    },
    /// The terminal answer; carries no observation.
    Answer { decision: Decision },
    /// A protocol violation, recorded without a decision.
    Fault { observation: Observation },
}

/// Ordered history of everything that happened during one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of dispatched tool steps, excluding faults and the
    /// terminal answer.
    pub fn steps(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, TranscriptEntry::Step { .. }))
            .count()
    }
}
