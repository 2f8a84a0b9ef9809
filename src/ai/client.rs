//! HTTP client for OpenAI-compatible chat-completion endpoints.
//!
//! One request, one reply: the client POSTs a chat payload and returns
//! `choices[0].message.content` verbatim. Transport problems surface as
//! [`LlmError`] values; [`LlmError::fallback_payload`] renders any of
//! them as the benign echo-command payload the rest of the pipeline
//! understands, so callers choose between the error and its rendering.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Command substituted for the model's answer when the call fails.
pub const FALLBACK_COMMAND: &str = "echo 'Could not retrieve command from LLM'";

/// Errors that can occur when talking to a provider.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("response is missing choices[0].message.content")]
    MissingContent,
}

impl LlmError {
    /// Render the error as a harmless command/explanation payload.
    ///
    /// The result is valid JSON in the same shape as a genuine model
    /// reply, so downstream parsing never has to branch on transport
    /// failures; the echo command itself still goes through safety
    /// screening like any other candidate.
    pub fn fallback_payload(&self) -> String {
        serde_json::json!({
            "command": FALLBACK_COMMAND,
            "explanation": format!("Error: {self}"),
        })
        .to_string()
    }
}

/// Chat message in the OpenAI wire format.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat-completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

impl ChatRequest {
    /// Build the standard two-message request used by both pipeline
    /// calls. Temperature is pinned to 0.0 for deterministic answers.
    pub fn new(
        model: impl Into<String>,
        system: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.into(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.into(),
                },
            ],
            temperature: 0.0,
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageBody,
}

#[derive(Deserialize)]
struct ChatMessageBody {
    content: String,
}

/// Seam for issuing chat-completion calls.
///
/// The pipeline only ever needs `complete`; tests substitute scripted
/// implementations so classification and provider resolution can be
/// exercised without a network.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one request and return the reply text verbatim.
    async fn complete(
        &self,
        api_url: &str,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<String, LlmError>;
}

/// reqwest-backed [`ChatBackend`].
pub struct LlmClient {
    client: Client,
}

impl LlmClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for LlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatBackend for LlmClient {
    async fn complete(
        &self,
        api_url: &str,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<String, LlmError> {
        let response = self
            .client
            .post(api_url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::MissingContent)
    }
}
