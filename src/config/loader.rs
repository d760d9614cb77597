use std::fs;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::agent::{AgentConfig, RawAgent};
use super::error::ConfigError;
use super::provider::{ProviderConfig, RawProvider};
use super::{AppConfig, CONFIG_PATH};

static ENV_LOADER: Once = Once::new();

/// Loads `config/.env` into the process environment exactly once.
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = dotenvy::from_filename("config/.env");
    });
}

#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    provider: Option<RawProvider>,
    agent: Option<RawAgent>,
}

/// Loads configuration from `path`, or from the default location when
/// `path` is `None`. A missing default file falls back to built-in
/// defaults; an explicitly named file must exist.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();

    match path {
        Some(explicit) => read_config(explicit),
        None => {
            let default_path = Path::new(CONFIG_PATH);
            if default_path.exists() {
                read_config(default_path)
            } else {
                debug!(path = CONFIG_PATH, "No configuration file found, using defaults");
                Ok(AppConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    })?;

    let raw: RawConfig = toml::from_str(&contents).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        source: err,
    })?;

    validate_and_build(raw)
}

fn validate_and_build(raw: RawConfig) -> Result<AppConfig, ConfigError> {
    let provider_defaults = ProviderConfig::default();
    let raw_provider = raw.provider.unwrap_or_default();

    let endpoint = raw_provider.endpoint.unwrap_or(provider_defaults.endpoint);
    if endpoint.trim().is_empty() {
        return Err(ConfigError::EmptyProviderField { field: "endpoint" });
    }

    let model = raw_provider.model.unwrap_or(provider_defaults.model);
    if model.trim().is_empty() {
        return Err(ConfigError::EmptyProviderField { field: "model" });
    }

    let provider = ProviderConfig {
        id: raw_provider.id.unwrap_or(provider_defaults.id),
        endpoint,
        model,
        api_key_env: raw_provider.api_key_env.or(provider_defaults.api_key_env),
        generation: raw_provider.generation.unwrap_or_default(),
    };

    let agent_defaults = AgentConfig::default();
    let raw_agent = raw.agent.unwrap_or_default();

    let max_iterations = raw_agent
        .max_iterations
        .unwrap_or(agent_defaults.max_iterations);
    if max_iterations == 0 {
        return Err(ConfigError::ZeroIterationCap);
    }

    let max_parse_failures = raw_agent
        .max_parse_failures
        .unwrap_or(agent_defaults.max_parse_failures);
    if max_parse_failures == 0 {
        return Err(ConfigError::ZeroParseFailureCap);
    }

    let agent = AgentConfig {
        max_iterations,
        max_parse_failures,
        step_delay: raw_agent
            .step_delay_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis),
        retry: raw_agent.retry.unwrap_or_default(),
    };

    Ok(AppConfig { provider, agent })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp config");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn loads_full_configuration() {
        let file = write_config(
            r#"
[provider]
id = "gemini"
endpoint = "https://example.test"
model = "gemini-1.5-flash"
api_key_env = "TEST_KEY"

[provider.generation]
temperature = 0.5
top_p = 0.9
top_k = 20

[agent]
max_iterations = 5
max_parse_failures = 2
step_delay_ms = 250

[agent.retry]
max_retries = 1
initial_delay_ms = 100
max_delay_ms = 400
backoff_multiplier = 2.0
"#,
        );

        let config = read_config(file.path()).expect("config should load");
        assert_eq!(config.provider.endpoint, "https://example.test");
        assert_eq!(config.provider.api_key_env.as_deref(), Some("TEST_KEY"));
        assert_eq!(config.provider.generation.top_k, 20);
        assert_eq!(config.agent.max_iterations, 5);
        assert_eq!(config.agent.max_parse_failures, 2);
        assert_eq!(config.agent.step_delay, Some(Duration::from_millis(250)));
        assert_eq!(config.agent.retry.max_retries, 1);
    }

    #[test]
    fn missing_tables_fall_back_to_defaults() {
        let file = write_config("");

        let config = read_config(file.path()).expect("empty config should load");
        assert_eq!(config.provider.model, "gemini-1.5-flash");
        assert_eq!(config.provider.api_key_env.as_deref(), Some("GOOGLE_API_KEY"));
        assert_eq!(config.agent.max_iterations, 10);
        assert_eq!(config.agent.max_parse_failures, 3);
        assert_eq!(config.agent.step_delay, None);
        assert_eq!(config.agent.retry.max_retries, 3);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let result = load_config(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn zero_iteration_cap_is_rejected() {
        let file = write_config("[agent]\nmax_iterations = 0\n");

        let result = read_config(file.path());
        assert!(matches!(result, Err(ConfigError::ZeroIterationCap)));
    }

    #[test]
    fn malformed_toml_is_reported_with_path() {
        let file = write_config("[agent\nmax_iterations = 5\n");

        let result = read_config(file.path());
        match result {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
