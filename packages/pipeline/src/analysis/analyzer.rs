use std::time::Instant;

use tracing::{debug, info};

use crate::analysis::client::{LlmClient, LlmRequest};
use crate::analysis::config::LlmConfig;
use crate::analysis::prompt;
use crate::analysis::types::{AnalysisRequest, AnalysisResponse, AnalysisState};
use crate::error::Result;

/// Sampling temperature for every completion call. The service never varies
/// it; zero keeps the remote model deterministic-leaning.
const TEMPERATURE: f64 = 0.0;

/// The three-step analysis pipeline: classify, extract entities, summarize.
///
/// Each step formats one prompt from the original text, issues one
/// completion call, and rebuilds the state with one new field. Any failed
/// call aborts the whole request; there are no partial results.
pub struct Analyzer<'a, C: LlmClient + ?Sized> {
    client: &'a C,
    config: &'a LlmConfig,
}

impl<'a, C: LlmClient + ?Sized> Analyzer<'a, C> {
    pub fn new(client: &'a C, config: &'a LlmConfig) -> Self {
        Self { client, config }
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        let request = LlmRequest::user(prompt, TEMPERATURE);
        let response = self.client.complete(&request).await?;
        Ok(response.content.trim().to_string())
    }

    /// Classify the text into one of the fixed categories.
    ///
    /// The label set is enforced only by the prompt; the model may return
    /// anything and callers must tolerate unexpected labels.
    pub async fn classify(&self, state: AnalysisState) -> Result<AnalysisState> {
        debug!("classification step");
        let classification = self
            .complete(prompt::build_classification_prompt(state.text()))
            .await?;
        Ok(state.with_classification(classification))
    }

    /// Extract named entities (people, organizations, places).
    pub async fn extract_entities(&self, state: AnalysisState) -> Result<AnalysisState> {
        debug!("entity extraction step");
        let raw = self
            .complete(prompt::build_entity_extraction_prompt(state.text()))
            .await?;
        Ok(state.with_entities(split_entities(&raw)))
    }

    /// Produce a one-sentence summary.
    pub async fn summarize(&self, state: AnalysisState) -> Result<AnalysisState> {
        debug!("summarization step");
        let summary = self
            .complete(prompt::build_summarization_prompt(state.text()))
            .await?;
        Ok(state.with_summary(summary))
    }

    /// Run the full pipeline for one request.
    ///
    /// All three steps run regardless of the include flags; the flags only
    /// mask fields in the response.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        let text_length = request.text.chars().count();
        info!(text_length, model = %self.config.model, "analyzing text");

        let start = Instant::now();

        let state = AnalysisState::new(request.text.clone());
        let state = self.classify(state).await?;
        let state = self.extract_entities(state).await?;
        let state = self.summarize(state).await?;

        let processing_time = start.elapsed().as_secs_f64();

        let mut metadata = serde_json::Map::new();
        metadata.insert(
            "model".into(),
            serde_json::Value::String(self.config.model.clone()),
        );
        metadata.insert("text_length".into(), serde_json::Value::from(text_length));

        Ok(AnalysisResponse {
            original_text: request.text.clone(),
            classification: if request.include_classification {
                state.classification
            } else {
                None
            },
            entities: if request.include_entities {
                state.entities
            } else {
                None
            },
            summary: if request.include_summary {
                state.summary
            } else {
                None
            },
            processing_time,
            metadata,
        })
    }
}

/// Split a comma-separated model response into entity strings.
///
/// Splits on the literal `", "` separator with no quoting or escaping; an
/// entity that itself contains a comma-space comes back as separate
/// fragments.
pub fn split_entities(raw: &str) -> Vec<String> {
    raw.split(", ").map(str::to_string).collect()
}
