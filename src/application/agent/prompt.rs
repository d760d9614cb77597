use super::decision::Decision;
use super::transcript::{Transcript, TranscriptEntry};
use crate::application::tooling::ToolRegistry;

const TEMPLATE: &str = r#"You are a ReAct (Reasoning and Acting) agent tasked with answering the following query:

#QUERY#
{{query}}

#TASK#
Your goal is to reason about the query and decide on the best course of action to answer it accurately.

#INSTRUCTIONS#
1. Analyze the query and previous observations if they exist
2. Decide on the next action: use a tool or provide a final answer
3. Always respond in this exact JSON format:

If you need to use a tool:
{
    "thought": "Your detailed reasoning about what to do next",
    "action": {
        "name": "tool_name",
        "input": {
            "param1": "value1"
        }
    }
}

If you have enough information to answer:
{
    "thought": "Your final reasoning process",
    "answer": "Your comprehensive answer to the query"
}

#IMPORTANT#
- Base your reasoning on actual observations from tool use
- Use tools when you need more information
- Provide final answer only when you have sufficient information
- If a tool fails, try a different approach
- If you cannot find necessary information, admit this clearly

#PREVIOUS_OBSERVATIONS#
{{history}}

#AVAILABLE_TOOLS#
{{tools}}"#;

const EMPTY_HISTORY: &str = "No previous observations.";

/// Renders prompts for the agent loop. Pure; identical inputs produce
/// identical strings, which keeps prompt content unit-testable without
/// a model.
pub struct PromptBuilder {
    catalogue: String,
}

impl PromptBuilder {
    /// Pre-renders the tool catalogue in registration order.
    pub fn new(registry: &ToolRegistry) -> Self {
        let specs: Vec<_> = registry.specs().collect();
        let catalogue =
            serde_json::to_string_pretty(&specs).unwrap_or_else(|_| "[]".to_string());
        Self { catalogue }
    }

    pub fn render(&self, query: &str, transcript: &Transcript) -> String {
        TEMPLATE
            .replace("{{query}}", query)
            .replace("{{history}}", &render_history(transcript))
            .replace("{{tools}}", &self.catalogue)
    }
}

fn render_history(transcript: &Transcript) -> String {
    if transcript.is_empty() {
        return EMPTY_HISTORY.to_string();
    }

    let mut lines = Vec::new();
    for entry in transcript.entries() {
        match entry {
            TranscriptEntry::Step {
                decision,
                observation,
            } => {
                push_decision(&mut lines, decision);
                lines.push(observation.to_string());
            }
            TranscriptEntry::Answer { decision } => push_decision(&mut lines, decision),
            TranscriptEntry::Fault { observation } => lines.push(observation.to_string()),
        }
    }
    lines.join("\n")
}

fn push_decision(lines: &mut Vec<String>, decision: &Decision) {
    match decision {
        Decision::Action { thought, action } => {
            lines.push(format!("Thought: {thought}"));
            lines.push(format!("Action: {} {}", action.name, action.input));
        }
        Decision::Answer { thought, answer } => {
            lines.push(format!("Thought: {thought}"));
            lines.push(format!("Assistant: {answer}"));
        }
    }
}
