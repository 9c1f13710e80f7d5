mod handlers;
mod middleware;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::analysis::{LlmClient, LlmConfig};
use crate::config::AppConfig;
use crate::error::Result;

pub use handlers::ApiError;

/// Shared server state. The client is stateless, so one instance serves all
/// requests; each request assembles its own `Analyzer` on top of it.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn LlmClient>,
    pub llm_config: Arc<LlmConfig>,
}

impl AppState {
    pub fn new(client: Arc<dyn LlmClient>, llm_config: LlmConfig) -> Self {
        Self {
            client,
            llm_config: Arc::new(llm_config),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/health", get(handlers::health));

    Router::new()
        .route("/", get(handlers::root))
        .nest("/api/v1", api_routes)
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the configured address and serve until SIGINT or SIGTERM.
pub async fn serve(config: &AppConfig, state: AppState) -> Result<()> {
    let app = router(state);
    let addr = config.socket_addr()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolve when a shutdown signal is received. In-flight requests run to
/// completion before the server exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::error!("failed to install SIGINT handler");
            std::future::pending::<()>().await
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
