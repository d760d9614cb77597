//! Gemini client over the generateContent REST endpoint.

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use super::traits::ModelClient;
use super::types::ModelError;
use crate::config::{GenerationConfig, ProviderConfig};

const API_PATH: &str = "v1beta/models";

/// HTTP client for the Gemini generateContent API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    id: String,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    generation: GenerationConfig,
    http: Client,
}

impl GeminiClient {
    pub fn new(
        id: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        generation: GenerationConfig,
    ) -> Self {
        Self {
            id: id.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
            generation,
            http: Client::new(),
        }
    }

    /// Builds a client from provider settings, resolving the API key
    /// from the configured environment variable.
    pub fn from_config(config: &ProviderConfig) -> Self {
        let api_key = resolve_api_key(&config.id, config.api_key_env.as_deref());
        Self::new(
            config.id.clone(),
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
            config.generation,
        )
    }

    fn request_url(&self, api_key: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        format!(
            "{base}/{API_PATH}/{model}:generateContent?key={api_key}",
            model = self.model
        )
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn id(&self) -> &str {
        &self.id
    }

    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ModelError::missing_api_key(&self.id))?;

        let payload = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": self.generation.temperature,
                "topP": self.generation.top_p,
                "topK": self.generation.top_k,
            }
        });

        info!(
            provider = %self.id,
            model = %self.model,
            prompt_chars = prompt.len(),
            "Sending request to Gemini"
        );

        let response = self
            .http
            .post(self.request_url(api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|err| ModelError::network(&self.id, err))?
            .error_for_status()
            .map_err(|err| ModelError::network(&self.id, err))?
            .json::<GenerateContentResponse>()
            .await
            .map_err(|err| ModelError::network(&self.id, err))?;

        debug!(provider = %self.id, "Received response from Gemini");

        response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .flat_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .find_map(|part| part.text)
            .ok_or_else(|| ModelError::invalid_response(&self.id, "missing candidate text"))
    }
}

fn resolve_api_key(provider: &str, env_var: Option<&str>) -> Option<String> {
    let env_var = env_var.map(str::trim).filter(|name| !name.is_empty())?;
    match env::var(env_var) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        Ok(_) => {
            warn!(provider, env_var, "API key environment variable is empty");
            None
        }
        Err(err) => {
            warn!(provider, env_var, %err, "API key environment variable is not set");
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}
