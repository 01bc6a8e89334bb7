//! The model gateway: prompt in, text out.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GatewayConfig;

const RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("the model API rejected the credential (HTTP {0})")]
    Unauthorized(u16),
    #[error("the model API quota or rate limit was exceeded")]
    RateLimited,
    #[error("the model API did not respond in time")]
    Timeout,
    #[error("could not reach the model API: {0}")]
    Transport(String),
    #[error("the model API failed with status {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("the model returned no text")]
    EmptyResponse,
}

impl GatewayError {
    /// Failures worth exactly one more attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Timeout | GatewayError::Transport(_) => true,
            GatewayError::Provider { status, .. } => *status >= 500,
            _ => false,
        }
    }

    fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                GatewayError::Unauthorized(status.as_u16())
            }
            StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited,
            _ => GatewayError::Provider {
                status: status.as_u16(),
                body,
            },
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;
}

// ---- Gemini API Structures ----

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate.
    pub fn into_text(self) -> Result<String, GatewayError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            tracing::warn!("Prompt blocked by the model API: {}", reason);
            return Err(GatewayError::EmptyResponse);
        }

        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().map(|part| part.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GatewayError::EmptyResponse);
        }
        Ok(text)
    }
}

// ---- Gemini Client ----

#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: String, config: &GatewayConfig) -> Result<Self, GatewayError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            config.model
        );
        Ok(Self {
            http_client,
            api_key,
            endpoint,
        })
    }

    async fn generate_once(&self, prompt: &str) -> Result<String, GatewayError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::from_status(status, body));
        }

        let result: GenerateContentResponse = response.json().await?;
        result.into_text()
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        tracing::debug!(prompt_chars = prompt.len(), "Sending prompt to model");
        match self.generate_once(prompt).await {
            Err(err) if err.is_transient() => {
                tracing::warn!("Transient model API failure, retrying once: {}", err);
                tokio::time::sleep(RETRY_DELAY).await;
                self.generate_once(prompt).await
            }
            other => other,
        }
    }
}
