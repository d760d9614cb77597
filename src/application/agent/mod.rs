//! The ReAct agent loop: prompt rendering, decision parsing, tool
//! dispatch, and run reporting.

mod decision;
mod models;
mod observer;
mod parser;
mod prompt;
mod runner;
mod transcript;


pub use decision::{Action, Decision};
pub use models::{RunReport, RunStatus};
pub use observer::{AgentObserver, NullObserver};
pub use parser::{parse_decision, ProtocolViolation};
pub use prompt::PromptBuilder;
pub use runner::Agent;
pub use transcript::{Observation, Transcript, TranscriptEntry};
