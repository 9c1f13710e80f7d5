//! HTTP API server for the TextLens analysis pipeline.

use std::sync::Arc;

use textlens_pipeline::analysis::{LlmConfig, OpenAiClient};
use textlens_pipeline::config::AppConfig;
use textlens_pipeline::server::{self, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // RUST_LOG takes precedence; LOG_LEVEL is the deployment-facing knob.
    let default_level = std::env::var("LOG_LEVEL")
        .map(|level| level.to_lowercase())
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let app_config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid server configuration");
            std::process::exit(1);
        }
    };

    let llm_config = match LlmConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid LLM configuration");
            std::process::exit(1);
        }
    };

    let client = match OpenAiClient::new(&llm_config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to build LLM client");
            std::process::exit(1);
        }
    };

    tracing::info!(
        model = %llm_config.model,
        base_url = %llm_config.api_base_url,
        "starting analysis API"
    );

    let state = AppState::new(Arc::new(client), llm_config);

    if let Err(e) = server::serve(&app_config, state).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
