use serde_json::{Map, Value};
use thiserror::Error;

use super::decision::{Action, Decision};
use crate::application::tooling::ToolRegistry;

/// Ways a model response can break the decision protocol. All of these
/// are recoverable; the loop reports them back to the model as
/// synthetic observations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolViolation {
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("ambiguous decision: {0}")]
    AmbiguousDecision(String),
    #[error("unknown tool '{0}'")]
    UnknownTool(String),
}

/// Parses a raw model response into a [`Decision`], validating the
/// requested tool name against the registry. Tool input content is
/// left to executors.
pub fn parse_decision(raw: &str, registry: &ToolRegistry) -> Result<Decision, ProtocolViolation> {
    let object = extract_object(raw).ok_or_else(|| {
        ProtocolViolation::MalformedResponse("no JSON object found in response".to_string())
    })?;

    let thought = match object.get("thought") {
        Some(Value::String(thought)) => thought.clone(),
        Some(_) => {
            return Err(ProtocolViolation::MalformedResponse(
                "'thought' must be a string".to_string(),
            ));
        }
        None => {
            return Err(ProtocolViolation::MalformedResponse(
                "missing 'thought' field".to_string(),
            ));
        }
    };

    match (object.get("action"), object.get("answer")) {
        (Some(_), Some(_)) => Err(ProtocolViolation::AmbiguousDecision(
            "both 'action' and 'answer' are present".to_string(),
        )),
        (None, None) => Err(ProtocolViolation::AmbiguousDecision(
            "neither 'action' nor 'answer' is present".to_string(),
        )),
        (None, Some(answer)) => {
            let answer = answer.as_str().ok_or_else(|| {
                ProtocolViolation::MalformedResponse("'answer' must be a string".to_string())
            })?;
            Ok(Decision::Answer {
                thought,
                answer: answer.to_string(),
            })
        }
        (Some(action), None) => {
            let action = parse_action(action, registry)?;
            Ok(Decision::Action { thought, action })
        }
    }
}

fn parse_action(value: &Value, registry: &ToolRegistry) -> Result<Action, ProtocolViolation> {
    let object = value.as_object().ok_or_else(|| {
        ProtocolViolation::MalformedResponse("'action' must be an object".to_string())
    })?;

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ProtocolViolation::MalformedResponse("'action.name' must be a string".to_string())
        })?;

    let input = object.get("input").cloned().ok_or_else(|| {
        ProtocolViolation::MalformedResponse("'action.input' is missing".to_string())
    })?;
    if !input.is_object() {
        return Err(ProtocolViolation::MalformedResponse(
            "'action.input' must be an object".to_string(),
        ));
    }

    if !registry.contains(name) {
        return Err(ProtocolViolation::UnknownTool(name.to_string()));
    }

    Ok(Action {
        name: name.to_string(),
        input,
    })
}

/// Pulls a JSON object out of a raw model reply. The model is told to
/// emit exactly one object, but replies arrive wrapped in prose or
/// code fences often enough that the whole text is tried first and a
/// balanced-brace scan recovers embedded objects after that.
fn extract_object(raw: &str) -> Option<Map<String, Value>> {
    let trimmed = raw.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        match value {
            Value::Object(map) => return Some(map),
            // Some models double-encode and hand back the object as a
            // JSON string.
            Value::String(inner) => return extract_object(&inner),
            _ => {}
        }
    }

    scan_balanced_object(trimmed)
}

fn scan_balanced_object(text: &str) -> Option<Map<String, Value>> {
    let bytes = text.as_bytes();
    let mut start: Option<usize> = None;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (position, &byte) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' if start.is_some() => in_string = true,
            b'{' => {
                if start.is_none() {
                    start = Some(position);
                }
                depth += 1;
            }
            b'}' => {
                if let Some(open) = start {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        if let Ok(Value::Object(map)) =
                            serde_json::from_str::<Value>(&text[open..=position])
                        {
                            return Some(map);
                        }
                        start = None;
                    }
                }
            }
            _ => {}
        }
    }

    None
}
