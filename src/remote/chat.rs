//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PromptConfig;
use crate::remote::generator::{RemoteError, SummaryGenerator};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Sends one `POST` per page: the system prompt and the page content as two
/// messages, authenticated with a bearer token.
#[derive(Debug, Clone, Default)]
pub struct ChatCompletionsGenerator {
    client: Client,
}

impl ChatCompletionsGenerator {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// A client whose requests fail with [`RemoteError::Request`] once
    /// `timeout` elapses.
    pub fn with_timeout(timeout: Duration) -> Result<Self, RemoteError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SummaryGenerator for ChatCompletionsGenerator {
    async fn generate(&self, prompt: &PromptConfig, content: &str) -> Result<String, RemoteError> {
        let body = ChatRequest {
            model: &prompt.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content,
                },
            ],
            temperature: prompt.temperature,
        };

        debug!(endpoint = %prompt.endpoint, model = %prompt.model, content_len = content.len(), "requesting summary");

        let response = self
            .client
            .post(&prompt.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(&prompt.credential)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Transport {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::MalformedResponse(e.to_string()))?;

        if let Some(error) = parsed.error.filter(|e| !e.is_null()) {
            return Err(RemoteError::Api(api_error_message(&error)));
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| RemoteError::MalformedResponse("response has no choices".to_string()))
    }
}

fn api_error_message(error: &serde_json::Value) -> String {
    match error {
        serde_json::Value::String(s) => s.clone(),
        other => other
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| other.to_string()),
    }
}
