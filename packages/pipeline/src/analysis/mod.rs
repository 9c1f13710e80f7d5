mod analyzer;
mod client;
mod config;
mod prompt;
mod types;

pub use analyzer::{split_entities, Analyzer};
#[cfg(any(test, feature = "test-utils"))]
pub use client::test_support::MockLlmClient;
pub use client::{LlmClient, LlmRequest, LlmResponse, Message, OpenAiClient, Role};
pub use config::LlmConfig;
pub use prompt::{
    build_classification_prompt, build_entity_extraction_prompt, build_summarization_prompt,
};
pub use types::{AnalysisRequest, AnalysisResponse, AnalysisState, HealthResponse};
