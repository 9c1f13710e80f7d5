use crate::error::{PipelineError, Result};

/// Configuration for the chat-completion API.
#[derive(Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Load configuration from environment variables.
    ///
    /// A missing API key is a hard error; everything else has a default
    /// matching the Dashscope compatible-mode deployment.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| PipelineError::Config("OPENAI_API_KEY not set".into()))?;

        let api_base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://dashscope.aliyuncs.com/compatible-mode/v1".into());

        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "qwen-plus".into());

        let timeout_secs = std::env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(120);

        Ok(Self {
            api_key,
            api_base_url,
            model,
            timeout_secs,
        })
    }

    /// Create a config builder for testing.
    pub fn builder(api_key: impl Into<String>) -> LlmConfigBuilder {
        LlmConfigBuilder {
            api_key: api_key.into(),
            api_base_url: "https://dashscope.aliyuncs.com/compatible-mode/v1".into(),
            model: "qwen-plus".into(),
            timeout_secs: 120,
        }
    }
}

/// Builder for constructing `LlmConfig` in tests.
pub struct LlmConfigBuilder {
    api_key: String,
    api_base_url: String,
    model: String,
    timeout_secs: u64,
}

impl LlmConfigBuilder {
    pub fn api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn build(self) -> LlmConfig {
        LlmConfig {
            api_key: self.api_key,
            api_base_url: self.api_base_url,
            model: self.model,
            timeout_secs: self.timeout_secs,
        }
    }
}
