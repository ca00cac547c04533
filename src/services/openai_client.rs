//! OpenAI chat-completions client
//!
//! Single outbound call per request, no retries. The client is constructed
//! once at startup and injected into the application state behind the
//! `CompletionBackend` trait so handlers (and tests) never touch a global.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("blocktutor/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Upstream provider errors
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport-level failure (DNS, TLS, connect, timeout)
    #[error("request to model provider failed: {0}")]
    Network(String),

    /// Provider answered with a non-2xx status
    #[error("model provider returned {status}: {message}")]
    Api {
        status: u16,
        message: String,
        error_type: Option<String>,
    },

    /// 2xx response that could not be decoded as a chat completion
    #[error("failed to decode model provider response: {0}")]
    Decode(String),

    /// 2xx response with no choices or an empty message
    #[error("model provider returned an empty completion")]
    EmptyCompletion,
}

impl UpstreamError {
    /// HTTP status reported by the provider, when there is one
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Provider-reported error type (e.g. "insufficient_quota"), when present
    pub fn error_type(&self) -> Option<&str> {
        match self {
            UpstreamError::Api { error_type, .. } => error_type.as_deref(),
            _ => None,
        }
    }
}

/// One chat turn sent to the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

impl ChatMessage {
    /// Plain-text turn
    pub fn text(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: MessageContent::Text(content.into()),
        }
    }

    /// Multimodal user turn (text parts plus inline images)
    pub fn parts(role: &str, parts: Vec<ContentPart>) -> Self {
        Self {
            role: role.to_string(),
            content: MessageContent::Parts(parts),
        }
    }
}

/// Message content: plain string or multimodal part list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// Content part - text or inline image
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrlData },
}

/// Image reference; `url` carries a data URL for uploaded screenshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrlData {
    pub url: String,
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

/// Completion text plus service metadata; produced once per request
#[derive(Debug, Clone)]
pub struct RawCompletion {
    pub role: String,
    pub text: String,
    pub model: Option<String>,
    pub usage: Option<Usage>,
}

/// Chat-completions request body (OpenAI-compatible)
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: Option<String>,
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    role: Option<String>,
    content: Option<String>,
}

/// Error body the provider returns alongside non-2xx statuses
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: Option<ProviderErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

/// Build an `Api` error from a non-2xx response body, tolerating bodies
/// that are not the documented `{"error": {...}}` shape.
fn api_error_from_body(status: u16, body: &str) -> UpstreamError {
    let detail = serde_json::from_str::<ProviderErrorBody>(body)
        .ok()
        .and_then(|b| b.error);

    let (message, error_type) = match detail {
        Some(d) => (
            d.message.unwrap_or_else(|| body.trim().to_string()),
            d.error_type,
        ),
        None => (body.trim().to_string(), None),
    };

    UpstreamError::Api {
        status,
        message,
        error_type,
    }
}

/// Single outbound inference call; the trait seam lets tests substitute a stub
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one message sequence to the provider and return its completion
    async fn complete(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<RawCompletion, UpstreamError>;
}

/// Reqwest-backed OpenAI client
pub struct OpenAiClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, UpstreamError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<RawCompletion, UpstreamError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model,
            messages: &messages,
        };

        tracing::debug!(model = model, turns = messages.len(), "dispatching completion request");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(api_error_from_body(status.as_u16(), &error_text));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        let raw = extract_completion(completion)?;

        tracing::info!(
            model = raw.model.as_deref().unwrap_or(model),
            completion_tokens = raw
                .usage
                .as_ref()
                .and_then(|u| u.completion_tokens)
                .unwrap_or(0),
            "completion received"
        );

        Ok(raw)
    }
}

/// Pull the completion text out of a decoded response.
///
/// A response with no choices, or whose message content is missing or
/// whitespace-only, counts as an empty completion and fails the dispatch.
fn extract_completion(
    completion: ChatCompletionResponse,
) -> Result<RawCompletion, UpstreamError> {
    let model = completion.model;
    let usage = completion.usage;

    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or(UpstreamError::EmptyCompletion)?;

    let text = choice
        .message
        .content
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or(UpstreamError::EmptyCompletion)?;

    Ok(RawCompletion {
        role: choice
            .message
            .role
            .unwrap_or_else(|| "assistant".to_string()),
        text,
        model,
        usage,
    })
}
