use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("provider field '{field}' must not be empty")]
    EmptyProviderField { field: &'static str },

    #[error("'agent.max_iterations' must be at least 1")]
    ZeroIterationCap,

    #[error("'agent.max_parse_failures' must be at least 1")]
    ZeroParseFailureCap,
}
