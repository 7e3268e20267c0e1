//! REST client for an OpenAI-compatible chat-completion endpoint.

use serde::Deserialize;

use crate::snapshot::{build_prompt, SYSTEM_PROMPT};

/// Default base URL for the chat-completion API.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model.
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Assistant configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Bearer token for the API. When absent, every ask fails with
    /// [`AssistantError::MissingApiKey`] but the rest of the service
    /// keeps working.
    pub api_key: Option<String>,
    /// Base HTTP URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Chat model identifier.
    pub model: String,
}

impl AssistantConfig {
    /// Load assistant configuration from environment variables.
    ///
    /// | Env Var          | Default                     |
    /// |------------------|-----------------------------|
    /// | `OPENAI_API_KEY` | unset (asks are rejected)   |
    /// | `LLM_BASE_URL`   | `https://api.openai.com/v1` |
    /// | `LLM_MODEL`      | `gpt-3.5-turbo`             |
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            base_url: std::env::var("LLM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
        }
    }
}

/// Errors from the assistant API layer.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// No API key is configured.
    #[error("no API key configured for the assistant")]
    MissingApiKey,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("assistant API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not contain an answer.
    #[error("malformed assistant response: {0}")]
    MalformedResponse(String),
}

/// HTTP client for the chat-completion API.
pub struct AssistantClient {
    client: reqwest::Client,
    config: AssistantConfig,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl AssistantClient {
    /// Create a new client with the given configuration.
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Whether an API key is configured.
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Forward a question about the given CSV snapshot and return the
    /// assistant's answer, trimmed.
    ///
    /// Sends a `POST {base_url}/chat/completions` request with a system
    /// message and the snapshot-plus-question prompt. No retries: every
    /// failure is terminal for the current request.
    pub async fn ask(&self, snapshot_csv: &str, question: &str) -> Result<String, AssistantError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AssistantError::MissingApiKey)?;

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(snapshot_csv, question) },
            ],
        });

        tracing::debug!(model = %self.config.model, "forwarding question to assistant");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AssistantError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let answer = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AssistantError::MalformedResponse("empty choices array".to_string()))?;

        Ok(answer.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_client_rejects_asks() {
        let client = AssistantClient::new(AssistantConfig {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        });
        assert!(!client.is_configured());
    }

    #[test]
    fn test_chat_response_shape_parses() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":" 42 "}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content, " 42 ");
    }
}
