//! Client for the chat-completion endpoint of the local inference server.
//!

use crate::config::AppConfig;
use async_trait::async_trait;
use di::{Ref, inject, injectable};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

pub const MODEL: &str = "phi4-mini";
pub const TEMPERATURE: f32 = 0.3;
pub const MAX_OUTPUT_TOKENS: u32 = 512;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

pub const USER_ROLE: &str = "user";
pub const SYSTEM_ROLE: &str = "system";

/// One role-tagged turn. Roles are passed through as given, so anything the inference
/// server understands is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> ChatMessage {
        ChatMessage {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> ChatMessage {
        ChatMessage::new(SYSTEM_ROLE, content)
    }

    pub fn user(content: impl Into<String>) -> ChatMessage {
        ChatMessage::new(USER_ROLE, content)
    }

    pub fn is_user(&self) -> bool {
        self.role == USER_ROLE
    }
}

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("failed to connect to `{endpoint}`")]
    Unreachable {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{0}")]
    Http(#[from] reqwest::Error),
}

#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Sends the full message list and returns the assistant's reply text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, InferenceError>;

    /// Address the client talks to, for operator-facing messages.
    fn endpoint(&self) -> &str;
}

#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: GenerationOptions,
}

#[derive(Serialize, Debug)]
struct GenerationOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize, Debug, Default)]
struct ChatCompletionResponse {
    #[serde(default)]
    message: Option<AssistantMessage>,
}

#[derive(Deserialize, Debug, Default)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Non-streaming client for an Ollama-style `/api/chat` endpoint.
pub struct OllamaClient {
    http: reqwest::Client,
    endpoint: String,
}

#[injectable(InferenceClient)]
impl OllamaClient {
    #[inject]
    pub fn create(config: Ref<AppConfig>) -> OllamaClient {
        OllamaClient::new(config.inference_url.clone())
    }
}

impl OllamaClient {
    pub fn new(endpoint: impl Into<String>) -> OllamaClient {
        OllamaClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn classify(&self, e: reqwest::Error) -> InferenceError {
        if e.is_connect() {
            InferenceError::Unreachable {
                endpoint: self.endpoint.clone(),
                source: e,
            }
        } else {
            InferenceError::Http(e)
        }
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, InferenceError> {
        let payload = ChatCompletionRequest {
            model: MODEL,
            messages,
            stream: false,
            options: GenerationOptions {
                temperature: TEMPERATURE,
                num_predict: MAX_OUTPUT_TOKENS,
            },
        };

        debug!("sending {} messages to {}", messages.len(), self.endpoint);
        let started = Instant::now();

        let response = self
            .http
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?
            .error_for_status()?;

        let body: ChatCompletionResponse = response.json().await?;

        info!(
            "inference done in {:.2} seconds",
            started.elapsed().as_secs_f32()
        );

        Ok(body
            .message
            .and_then(|m| m.content)
            .map(|content| content.trim().to_owned())
            .unwrap_or_default())
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
