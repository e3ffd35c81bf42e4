//! HTTP client for the OpenRouter chat-completions endpoint.

use async_trait::async_trait;
use neuronav_core::error::CoreError;
use neuronav_core::generation::{AuthorRequest, AuthoredRoadmap, RoadmapAuthor};
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::parse::parse_roadmap_content;
use crate::prompt::{build_user_prompt, SYSTEM_MESSAGE};

const REFERER: &str = "https://neuronav.ai";
const APP_TITLE: &str = "NeuroNav Learning Assistant";

/// Errors from the chat-completions layer.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("OpenRouter API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response had no usable assistant message.
    #[error("Invalid response from OpenRouter: {0}")]
    InvalidResponse(String),
}

impl From<AiError> for CoreError {
    fn from(err: AiError) -> Self {
        CoreError::Upstream(err.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Roadmap author backed by an OpenRouter-hosted model.
pub struct OpenRouterAuthor {
    client: reqwest::Client,
    config: AiConfig,
}

impl OpenRouterAuthor {
    /// Build a client with the configured request timeout.
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send one chat completion and return the assistant's text.
    pub async fn complete(&self, user_prompt: &str) -> Result<String, AiError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", APP_TITLE)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let parsed: ChatResponse = response.json().await?;
        first_message_content(parsed)
    }

    // ---- private helpers ----

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

fn first_message_content(response: ChatResponse) -> Result<String, AiError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| AiError::InvalidResponse("no assistant message in choices".to_string()))
}

#[async_trait]
impl RoadmapAuthor for OpenRouterAuthor {
    async fn author(&self, request: &AuthorRequest) -> Result<AuthoredRoadmap, CoreError> {
        tracing::debug!(
            topic = %request.topic,
            brain_type = %request.brain_type,
            model = %self.config.model,
            "Requesting AI roadmap"
        );
        let content = self.complete(&build_user_prompt(request)).await?;
        Ok(parse_roadmap_content(
            &content,
            &request.topic,
            request.brain_type,
        ))
    }
}
