use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::analysis::config::LlmConfig;
use crate::error::{PipelineError, Result};

/// Role of a message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Request to the LLM. Single-turn: each pipeline step sends exactly one
/// user message and no history is carried between calls.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    pub temperature: f64,
}

impl LlmRequest {
    /// Build a single-turn request from one user prompt.
    pub fn user(prompt: impl Into<String>, temperature: f64) -> Self {
        Self {
            messages: vec![Message {
                role: Role::User,
                content: prompt.into(),
            }],
            temperature,
        }
    }
}

/// Response from the LLM. The completion text is the only field consumed.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
}

/// Trait for LLM clients, enabling mocking in tests.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// Client for OpenAI-compatible chat-completion APIs (Dashscope by default).
///
/// NOTE: Do NOT derive `Debug` on this struct — `api_key` would be exposed.
/// If Debug is needed, implement it manually with the key redacted.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(PipelineError::LlmApiRequest)?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            api_base_url: config.api_base_url.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        let url = format!("{}/chat/completions", self.api_base_url);

        let body = ChatCompletionRequest {
            model: &self.model,
            temperature: request.temperature,
            messages: &request.messages,
        };

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(PipelineError::LlmApiRequest)?;

        let status = resp.status().as_u16();

        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body_text)
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .unwrap_or(body_text);
            return Err(PipelineError::LlmApiError { status, message });
        }

        let api_response: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| PipelineError::LlmResponseParse(e.to_string()))?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(PipelineError::LlmEmptyResponse);
        }

        Ok(LlmResponse { content })
    }
}

/// Test utilities for the LLM client.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Mock LLM client for testing. Returns pre-configured responses in order
    /// and records every request it receives.
    pub struct MockLlmClient {
        responses: Mutex<Vec<Result<LlmResponse>>>,
        requests: Mutex<Vec<LlmRequest>>,
    }

    impl MockLlmClient {
        pub fn new(responses: Vec<Result<LlmResponse>>) -> Self {
            // Reverse so we can pop from the end
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn with_response(content: &str) -> Self {
            Self::new(vec![Ok(LlmResponse {
                content: content.to_string(),
            })])
        }

        pub fn with_responses(contents: Vec<&str>) -> Self {
            Self::new(
                contents
                    .into_iter()
                    .map(|c| {
                        Ok(LlmResponse {
                            content: c.to_string(),
                        })
                    })
                    .collect(),
            )
        }

        /// Requests received so far, in call order.
        pub fn requests(&self) -> Vec<LlmRequest> {
            self.requests
                .lock()
                .map(|reqs| reqs.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(request.clone());
            }
            let mut responses = self
                .responses
                .lock()
                .map_err(|e| PipelineError::LlmResponseParse(format!("mock lock poisoned: {e}")))?;
            responses.pop().unwrap_or(Err(PipelineError::LlmEmptyResponse))
        }
    }
}
