//! ReAct-style agent loop with a demo logistics toolset.
//!
//! The agent takes a natural language query, asks a model to reason
//! about it, and alternates between tool calls and further reasoning
//! until the model produces a final answer. Every run yields a
//! [`agent::RunReport`] with the full transcript, whether it ended in
//! an answer, the iteration cap, or a failure.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use waybill::application::agent::Agent;
//! use waybill::application::tooling::builtin_registry;
//! use waybill::config::AppConfig;
//! use waybill::infrastructure::model::GeminiClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::load(None).expect("config");
//!     let registry = Arc::new(builtin_registry().expect("registry"));
//!     let model = GeminiClient::from_config(&config.provider);
//!     let agent = Agent::new(model, registry, config.agent.clone());
//!
//!     let report = agent.run("Plan a delivery from Chicago to Denver").await;
//!     println!("{:?}", report.answer);
//! }
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod infrastructure;

pub use application::{agent, console, tooling};
pub use config::AppConfig;
pub use infrastructure::model;
