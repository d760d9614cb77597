use async_trait::async_trait;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Errors a tool can report back to the agent loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error("missing required parameter '{name}'")]
    MissingParameter { name: String },
    #[error("invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
    #[error("{0}")]
    Failed(String),
}

impl ToolError {
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// A callable tool. Implementations own their parameter validation;
/// the loop hands over whatever JSON object the model produced.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, input: Value) -> Result<Value, ToolError>;
}

/// Describes a tool to the model: name, purpose, and accepted parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "parameters_as_map")]
    pub parameters: Vec<ParamSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub description: String,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.parameters.push(ParamSpec {
            name: name.into(),
            description: description.into(),
        });
        self
    }
}

// Parameters serialize in declared order as a name to description map.
fn parameters_as_map<S>(parameters: &[ParamSpec], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(parameters.len()))?;
    for param in parameters {
        map.serialize_entry(&param.name, &param.description)?;
    }
    map.end()
}

/// Pulls a mandatory non-empty string parameter out of a tool input.
pub fn require_str<'a>(input: &'a Value, name: &str) -> Result<&'a str, ToolError> {
    match input.get(name) {
        Some(Value::String(value)) if !value.trim().is_empty() => Ok(value),
        Some(Value::String(_)) => Err(ToolError::invalid_parameter(name, "must not be empty")),
        Some(_) => Err(ToolError::invalid_parameter(name, "must be a string")),
        None => Err(ToolError::missing_parameter(name)),
    }
}
