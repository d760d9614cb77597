use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::decision::{Action, Decision};
use super::models::RunReport;
use super::observer::{AgentObserver, NullObserver};
use super::parser::{parse_decision, ProtocolViolation};
use super::prompt::PromptBuilder;
use super::transcript::{Observation, Transcript, TranscriptEntry};
use crate::application::tooling::ToolRegistry;
use crate::config::AgentConfig;
use crate::infrastructure::model::{ModelClient, ModelError};

/// The ReAct controller. Drives prompt, decision, and tool dispatch
/// rounds against one model client and one tool registry.
pub struct Agent<M: ModelClient> {
    model: M,
    registry: Arc<ToolRegistry>,
    prompts: PromptBuilder,
    config: AgentConfig,
    observer: Arc<dyn AgentObserver>,
}

impl<M: ModelClient> Agent<M> {
    pub fn new(model: M, registry: Arc<ToolRegistry>, config: AgentConfig) -> Self {
        let prompts = PromptBuilder::new(&registry);
        Self {
            model,
            registry,
            prompts,
            config,
            observer: Arc::new(NullObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn AgentObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Drives one query to a terminal state. Infallible by design:
    /// model failures and protocol breakdowns come back inside the
    /// report. The agent holds no state across calls, so one instance
    /// may serve concurrent queries.
    pub async fn run(&self, query: &str) -> RunReport {
        let run_id = Uuid::new_v4().to_string();
        info!(
            run_id = %run_id,
            model = self.model.id(),
            query_chars = query.len(),
            "Agent run started"
        );

        let mut transcript = Transcript::new();
        let mut dispatched = 0usize;
        let mut consecutive_faults = 0usize;
        let mut round = 0usize;

        loop {
            round += 1;
            self.observer.on_iteration(round);

            self.pace().await;
            let prompt = self.prompts.render(query, &transcript);
            self.observer.on_prompt(&prompt);
            debug!(
                run_id = %run_id,
                round,
                prompt_chars = prompt.len(),
                "Submitting prompt to model"
            );

            let raw = match self.complete_with_retry(&prompt).await {
                Ok(raw) => raw,
                Err(error) => {
                    warn!(run_id = %run_id, round, %error, "Model call failed after retries");
                    return RunReport::failed(run_id, error.to_string(), transcript);
                }
            };
            self.observer.on_raw_response(&raw);

            let decision = match parse_decision(&raw, &self.registry) {
                Ok(decision) => decision,
                Err(violation) => {
                    consecutive_faults += 1;
                    warn!(
                        run_id = %run_id,
                        round,
                        consecutive_faults,
                        error = %violation,
                        "Model response violated the decision protocol"
                    );
                    let observation = Observation::Protocol {
                        error: self.describe_violation(&violation),
                    };
                    self.observer.on_observation(&observation);
                    transcript.push(TranscriptEntry::Fault { observation });

                    if consecutive_faults >= self.config.max_parse_failures {
                        return RunReport::failed(
                            run_id,
                            format!(
                                "model produced {consecutive_faults} consecutive invalid \
                                 decisions, last: {violation}"
                            ),
                            transcript,
                        );
                    }
                    continue;
                }
            };
            consecutive_faults = 0;
            self.observer.on_decision(&decision);

            match decision {
                Decision::Answer { thought, answer } => {
                    info!(run_id = %run_id, round, "Agent produced final answer");
                    transcript.push(TranscriptEntry::Answer {
                        decision: Decision::Answer {
                            thought,
                            answer: answer.clone(),
                        },
                    });
                    return RunReport::done(run_id, answer, transcript);
                }
                Decision::Action { thought, action } => {
                    self.pace().await;
                    info!(
                        run_id = %run_id,
                        round,
                        tool = %action.name,
                        "Agent requested tool execution"
                    );
                    let observation = self.dispatch(&action).await;
                    self.observer.on_observation(&observation);
                    transcript.push(TranscriptEntry::Step {
                        decision: Decision::Action { thought, action },
                        observation,
                    });

                    dispatched += 1;
                    if dispatched >= self.config.max_iterations {
                        info!(
                            run_id = %run_id,
                            dispatched,
                            "Iteration cap reached without a final answer"
                        );
                        return RunReport::capped(run_id, transcript);
                    }
                }
            }
        }
    }

    /// Runs one tool on a detached task. An abandoned query never
    /// force-terminates an in-flight tool call; the task completes on
    /// its own and the result is discarded.
    async fn dispatch(&self, action: &Action) -> Observation {
        let tool = action.name.clone();
        let Some(registered) = self.registry.lookup(&tool) else {
            return Observation::Protocol {
                error: format!("unknown tool '{tool}'"),
            };
        };

        let executor = Arc::clone(&registered.executor);
        let input = action.input.clone();
        let handle = tokio::spawn(async move { executor.execute(input).await });

        match handle.await {
            Ok(Ok(result)) => {
                debug!(tool = %tool, "Tool execution succeeded");
                Observation::Success { tool, result }
            }
            Ok(Err(error)) => {
                warn!(tool = %tool, %error, "Tool reported an error");
                Observation::Failure {
                    tool,
                    error: error.to_string(),
                }
            }
            Err(join_error) => {
                warn!(tool = %tool, %join_error, "Tool task did not complete");
                Observation::Failure {
                    tool,
                    error: join_error.to_string(),
                }
            }
        }
    }

    async fn complete_with_retry(&self, prompt: &str) -> Result<String, ModelError> {
        let retry = self.config.retry;
        let mut attempt = 0u32;
        loop {
            match self.model.complete(prompt).await {
                Ok(raw) => return Ok(raw),
                Err(error) if attempt < retry.max_retries => {
                    attempt += 1;
                    let delay = retry.delay_for(attempt);
                    warn!(
                        attempt,
                        max_retries = retry.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        %error,
                        "Model call failed, backing off before retry"
                    );
                    sleep(delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn pace(&self) {
        if let Some(delay) = self.config.step_delay {
            sleep(delay).await;
        }
    }

    /// Error text fed back to the model. Unknown-tool violations name
    /// the registered tools so the model can correct itself.
    fn describe_violation(&self, violation: &ProtocolViolation) -> String {
        match violation {
            ProtocolViolation::UnknownTool(name) => {
                let available: Vec<&str> = self.registry.names().collect();
                format!(
                    "Tool '{name}' is not available. Please use only: {}",
                    available.join(", ")
                )
            }
            other => other.to_string(),
        }
    }
}
