//! CLI entry point for TextLens.

use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Initialize tracing with WARN level by default, respecting RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    if let Err(e) = cli::run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
