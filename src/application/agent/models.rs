use serde::Serialize;

use super::transcript::Transcript;

/// Answer returned when the iteration cap is reached without a final
/// decision from the model.
pub(super) const CAPPED_ANSWER: &str =
    "I apologize, but I couldn't find a satisfactory answer within the allowed iterations.";

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    /// The model produced a final answer.
    Done,
    /// The iteration cap was hit before a final answer.
    Capped,
    /// The model or backend failed in a way the loop could not recover from.
    Failed,
}

/// Everything one run produced. Failure is expressed here rather than
/// raised; [`Agent::run`](super::Agent::run) never errors.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    pub transcript: Transcript,
}

impl RunReport {
    pub(super) fn done(run_id: String, answer: String, transcript: Transcript) -> Self {
        Self {
            run_id,
            status: RunStatus::Done,
            answer: Some(answer),
            failure: None,
            transcript,
        }
    }

    pub(super) fn capped(run_id: String, transcript: Transcript) -> Self {
        Self {
            run_id,
            status: RunStatus::Capped,
            answer: Some(CAPPED_ANSWER.to_string()),
            failure: None,
            transcript,
        }
    }

    pub(super) fn failed(run_id: String, failure: String, transcript: Transcript) -> Self {
        Self {
            run_id,
            status: RunStatus::Failed,
            answer: None,
            failure: Some(failure),
            transcript,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == RunStatus::Done
    }
}
