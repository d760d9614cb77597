use serde::Deserialize;

const DEFAULT_PROVIDER_ID: &str = "gemini";
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Sampling settings forwarded to the model backend.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.8,
            top_k: 40,
        }
    }
}

/// Raw `[provider]` table as read from TOML.
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawProvider {
    pub id: Option<String>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub generation: Option<GenerationConfig>,
}

/// Validated model provider settings.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub id: String,
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key. The key
    /// itself never lives in the config file.
    pub api_key_env: Option<String>,
    pub generation: GenerationConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_PROVIDER_ID.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: Some(DEFAULT_API_KEY_ENV.to_string()),
            generation: GenerationConfig::default(),
        }
    }
}
