//! OpenAI-compatible chat completion client.
//!
//! Works with OpenRouter (the default), OpenAI, and any endpoint exposing
//! `/chat/completions` with bearer authentication.
//!
//! One `complete` call is one non-streaming POST. There is no retry and,
//! unless `request_timeout_secs` is configured, no timeout.

use async_trait::async_trait;
use mindnest_config::AppConfig;
use mindnest_core::completion::CompletionClient;
use mindnest_core::error::CompletionError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// An OpenAI-compatible chat completion client.
pub struct ChatCompletionClient {
    name: String,
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl ChatCompletionClient {
    /// Create a new client. A `None` key yields a client whose every call
    /// fails with `CompletionError::NotConfigured`.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, CompletionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CompletionError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            client,
        })
    }

    /// Create an OpenRouter client with the default model.
    pub fn openrouter(api_key: impl Into<String>) -> Result<Self, CompletionError> {
        let defaults = AppConfig::default();
        Self::new(
            "openrouter",
            defaults.api_url,
            Some(api_key.into()),
            defaults.model,
            None,
        )
    }

    /// Build a client from the loaded configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, CompletionError> {
        let name = if config.api_url.contains("openrouter.ai") {
            "openrouter"
        } else {
            "openai_compat"
        };
        Self::new(
            name,
            config.api_url.clone(),
            config.api_key.clone(),
            config.model.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_api_messages<'a>(
        system_instructions: &'a [String],
        user_utterance: &'a str,
    ) -> Vec<ApiMessage<'a>> {
        system_instructions
            .iter()
            .map(|content| ApiMessage {
                role: "system",
                content,
            })
            .chain(std::iter::once(ApiMessage {
                role: "user",
                content: user_utterance,
            }))
            .collect()
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        system_instructions: &[String],
        user_utterance: &str,
    ) -> Result<String, CompletionError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(CompletionError::NotConfigured(
                "no API key; set MINDNEST_API_KEY or api_key in config.toml".into(),
            ));
        };

        let url = format!("{}/chat/completions", self.base_url);
        let body = ApiRequest {
            model: &self.model,
            messages: Self::to_api_messages(system_instructions, user_utterance),
        };

        debug!(
            client = %self.name,
            model = %self.model,
            instructions = system_instructions.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %error_body, "Completion service returned error");
            return Err(CompletionError::Api {
                status_code: status.as_u16(),
                message: format!("Request failed with status code {}", status.as_u16()),
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Malformed(e.to_string()))?;

        let content = api_response
            .choices
            .and_then(|choices| choices.into_iter().next())
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or(CompletionError::EmptyResponse)?;

        debug!(client = %self.name, len = content.len(), "Completion received");
        Ok(content)
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Option<Vec<ApiChoice>>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    #[serde(default)]
    message: Option<ApiResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ApiResponseMessage {
    content: Option<String>,
}
