//! DeepSeek - chat completion backend
//!
//! Uses the OpenAI-compatible `/chat/completions` endpoint with bearer-token
//! authentication. Only plain text completions are needed by the router.

use crate::error::{Error, Result};
use crate::message::Message;
use crate::util::{mask_api_key, truncate_safe};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

/// DeepSeek API base URL
pub const DEEPSEEK_API_BASE: &str = "https://api.deepseek.com/v1";

/// Default DeepSeek model
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

/// Environment variable overriding the model
pub const MODEL_ENV: &str = "DEEPSEEK_MODEL";

/// Maximum length of an API error body kept in messages
const MAX_ERROR_LEN: usize = 300;

/// DeepSeek client configuration
#[derive(Clone)]
pub struct DeepSeekConfig {
    /// API key
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

// SECURITY: Custom Debug implementation to mask API key
impl fmt::Debug for DeepSeekConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl DeepSeekConfig {
    /// Create a new configuration with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEEPSEEK_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Create configuration from environment variables
    ///
    /// # Errors
    /// Returns [`Error::NotConfigured`] when `DEEPSEEK_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::NotConfigured(format!("{API_KEY_ENV} not set")))?;

        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }
        Ok(config)
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Sanitize API error messages
fn sanitize_api_error(error: &str) -> String {
    let lower = error.to_lowercase();

    if lower.contains("api key")
        || lower.contains("apikey")
        || lower.contains("invalid key")
        || lower.contains("unauthorized")
        || lower.contains("authentication")
    {
        return format!("API authentication error. Please check your {API_KEY_ENV}.");
    }

    if lower.contains("rate limit") || lower.contains("quota") {
        return "DeepSeek rate limit exceeded. Please try again later.".to_string();
    }

    if error.len() > MAX_ERROR_LEN {
        format!("{}...(truncated)", truncate_safe(error, MAX_ERROR_LEN))
    } else {
        error.to_string()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Extract `choices[0].message.content` from a response body
fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| Error::InvalidResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content.unwrap_or_default())
        .ok_or_else(|| Error::InvalidResponse("No choices in response".to_string()))
}

/// DeepSeek chat client
pub struct DeepSeekClient {
    client: Client,
    config: DeepSeekConfig,
}

impl fmt::Debug for DeepSeekClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DeepSeekClient {
    /// Create a new DeepSeek client
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: DeepSeekConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Provider(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(DeepSeekConfig::from_env()?)
    }

    /// Send a single user prompt and return the assistant's reply
    pub async fn chat(&self, prompt: &str) -> Result<String> {
        self.complete(&[Message::user(prompt)]).await
    }

    /// Send a conversation and return `choices[0].message.content`
    #[instrument(skip(self, messages), fields(model = %self.config.model, messages = messages.len()))]
    pub async fn complete(&self, messages: &[Message]) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
        };

        debug!("Sending request to DeepSeek");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(sanitize_api_error(&e.to_string())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(sanitize_api_error(&e.to_string())))?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: sanitize_api_error(&body),
            });
        }

        parse_completion(&body)
    }
}

#[cfg(test)]
mod tests;
