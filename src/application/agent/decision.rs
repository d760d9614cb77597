use serde::Serialize;
use serde_json::Value;

/// A request to run a named tool with a JSON object as input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub name: String,
    pub input: Value,
}

/// One structured model output, matching the JSON shapes the prompt
/// instructs the model to produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Decision {
    Action { thought: String, action: Action },
    Answer { thought: String, answer: String },
}

impl Decision {
    pub fn thought(&self) -> &str {
        match self {
            Self::Action { thought, .. } => thought,
            Self::Answer { thought, .. } => thought,
        }
    }
}
