use async_trait::async_trait;

use super::types::ModelError;

/// Request/response text completion backend driving the agent.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Stable identifier used in logs and error messages.
    fn id(&self) -> &str;

    /// One prompt in, raw model text out.
    async fn complete(&self, prompt: &str) -> Result<String, ModelError>;
}
