use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "zh".into()
}

/// A text-analysis request. Immutable once received; the include flags only
/// control which fields appear in the response, never which steps run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// The text to analyze.
    pub text: String,
    #[serde(default = "default_true")]
    pub include_classification: bool,
    #[serde(default = "default_true")]
    pub include_entities: bool,
    #[serde(default = "default_true")]
    pub include_summary: bool,
    /// Language tag of the input text. Accepted and echoed through, unused
    /// by the pipeline.
    #[serde(default = "default_language")]
    pub language: String,
}

impl AnalysisRequest {
    /// A request for the given text with every artifact included.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            include_classification: true,
            include_entities: true,
            include_summary: true,
            language: default_language(),
        }
    }
}

/// Per-request working record threaded through the pipeline steps.
///
/// Starts with only the input text; each step rebuilds the record with one
/// new field set. Steps read only `text`, never each other's output, so the
/// entity-extraction and summarization steps commute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisState {
    text: String,
    pub classification: Option<String>,
    pub entities: Option<Vec<String>>,
    pub summary: Option<String>,
}

impl AnalysisState {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            classification: None,
            entities: None,
            summary: None,
        }
    }

    /// The original input text shared by all steps.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn with_classification(self, classification: impl Into<String>) -> Self {
        Self {
            classification: Some(classification.into()),
            ..self
        }
    }

    pub fn with_entities(self, entities: Vec<String>) -> Self {
        Self {
            entities: Some(entities),
            ..self
        }
    }

    pub fn with_summary(self, summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..self
        }
    }
}

/// Result of analyzing one request. Optional fields are omitted from the
/// JSON body when the corresponding include flag was false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub original_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Wall-clock pipeline duration in seconds.
    pub processing_time: f64,
    /// Free-form metadata: model name and input length.
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Health-check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Dependency name to connectivity status. Reported statically; the
    /// handler performs no probing.
    pub dependencies: BTreeMap<String, String>,
}
