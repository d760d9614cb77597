//! End-to-end agent loop tests against the public crate surface.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use waybill::application::agent::{Agent, RunStatus, TranscriptEntry};
use waybill::application::tooling::builtin_registry;
use waybill::config::AgentConfig;
use waybill::infrastructure::model::{ModelClient, ModelError, RetryPolicy};

struct ScriptedModel {
    responses: Mutex<Vec<String>>,
}

impl ScriptedModel {
    fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(String::from).collect()),
        }
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, ModelError> {
        let mut responses = self.responses.lock().await;
        if responses.is_empty() {
            return Err(ModelError::invalid_response("scripted", "script exhausted"));
        }
        Ok(responses.remove(0))
    }
}

fn fast_config() -> AgentConfig {
    AgentConfig {
        retry: RetryPolicy::immediate(0),
        ..AgentConfig::default()
    }
}

#[tokio::test]
async fn logistics_flow_reaches_an_answer() {
    let model = ScriptedModel::new(vec![
        r#"{"thought":"find routes first","action":{"name":"find_routes","input":{"origin":"Chicago","destination":"Denver"}}}"#,
        r#"{"thought":"check the first route","action":{"name":"check_conditions","input":{"route_id":"RT1234"}}}"#,
        r#"{"thought":"dispatch on it","action":{"name":"dispatch_truck","input":{"route_id":"RT1234"}}}"#,
        r#"{"thought":"all booked","answer":"Truck dispatched on RT1234."}"#,
    ]);
    let registry = Arc::new(builtin_registry().expect("registry"));
    let agent = Agent::new(model, registry, fast_config());

    let report = agent.run("Plan a delivery from Chicago to Denver").await;

    assert!(report.is_done());
    assert_eq!(report.answer.as_deref(), Some("Truck dispatched on RT1234."));
    assert_eq!(report.transcript.steps(), 3);
}

#[tokio::test]
async fn report_serializes_for_automation() {
    let model = ScriptedModel::new(vec![
        r#"{"thought":"look one up","action":{"name":"find_joke","input":{}}}"#,
        r#"{"thought":"got one","answer":"Here you go."}"#,
    ]);
    let registry = Arc::new(builtin_registry().expect("registry"));
    let agent = Agent::new(model, registry, fast_config());

    let report = agent.run("tell me a joke").await;
    let json = serde_json::to_value(&report).expect("serialize report");

    assert_eq!(json["status"], "DONE");
    assert_eq!(json["answer"], "Here you go.");
    assert!(json.get("failure").is_none());
    let transcript = json["transcript"].as_array().expect("transcript array");
    assert_eq!(transcript.len(), 2);
    assert!(transcript[0].get("step").is_some());
    assert!(transcript[1].get("answer").is_some());
}

#[tokio::test]
async fn capped_runs_return_partial_transcripts() {
    let model = ScriptedModel::new(vec![
        r#"{"thought":"one","action":{"name":"find_joke","input":{}}}"#,
        r#"{"thought":"two","action":{"name":"tell_fortune","input":{}}}"#,
    ]);
    let registry = Arc::new(builtin_registry().expect("registry"));
    let config = AgentConfig {
        max_iterations: 2,
        ..fast_config()
    };
    let agent = Agent::new(model, registry, config);

    let report = agent.run("keep going forever").await;

    assert_eq!(report.status, RunStatus::Capped);
    assert!(report.answer.is_some());
    assert_eq!(report.transcript.steps(), 2);
    assert!(report
        .transcript
        .entries()
        .iter()
        .all(|entry| matches!(entry, TranscriptEntry::Step { .. })));
}
