//! Model backends and the client trait the agent loop drives.

mod gemini;
mod retry;
mod traits;
mod types;

pub use gemini::GeminiClient;
pub use retry::RetryPolicy;
pub use traits::ModelClient;
pub use types::ModelError;
