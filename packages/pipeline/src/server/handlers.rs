use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::analysis::{AnalysisRequest, AnalysisResponse, Analyzer, HealthResponse};
use crate::error::PipelineError;
use crate::server::AppState;

/// Pipeline failure surfaced over HTTP: a 500 with the error text as the
/// only diagnostic detail. No structured error codes.
pub struct ApiError(PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "analysis request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "detail": self.0.to_string() })),
        )
            .into_response()
    }
}

/// `POST /api/v1/analyze` — run the three-step pipeline on the given text.
///
/// A body without `text` is rejected by the JSON extractor with a 4xx before
/// the pipeline runs.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let analyzer = Analyzer::new(state.client.as_ref(), state.llm_config.as_ref());
    let response = analyzer.analyze(&request).await?;
    Ok(Json(response))
}

/// `GET /api/v1/health` — static status, no dependency probing.
pub async fn health() -> Json<HealthResponse> {
    let mut dependencies = BTreeMap::new();
    dependencies.insert("llm_api".to_string(), "configured".to_string());

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        dependencies,
    })
}

/// `GET /` — service banner.
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "TextLens text analysis service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
