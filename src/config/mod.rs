//! Configuration loading and validation.
//!
//! Settings come from an optional TOML file plus environment variables
//! loaded from `config/.env`. Everything has a sensible default so the
//! binary runs with no configuration at all.

mod agent;
mod error;
mod loader;
mod provider;

use std::path::Path;

pub use agent::AgentConfig;
pub use error::ConfigError;
pub use loader::{ensure_env_loaded, load_config};
pub use provider::{GenerationConfig, ProviderConfig};

/// Default configuration file location, relative to the working directory.
pub const CONFIG_PATH: &str = "config/agent.toml";

/// Fully validated application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub agent: AgentConfig,
}

impl AppConfig {
    /// Loads and validates configuration from `path`, falling back to
    /// the default file and then to built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        loader::load_config(path)
    }
}
