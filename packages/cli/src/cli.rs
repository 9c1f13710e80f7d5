//! Command-line interface for TextLens.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use textlens_pipeline::analysis::{AnalysisRequest, Analyzer, LlmConfig, OpenAiClient};
use textlens_pipeline::config::AppConfig;
use textlens_pipeline::error::PipelineError;
use textlens_pipeline::server::{self, AppState};

/// TextLens - text classification, entity extraction and summarization.
#[derive(Parser)]
#[command(name = "textlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a piece of text and print the derived artifacts.
    Analyze {
        /// Text to analyze; reads stdin when neither TEXT nor --file is given.
        text: Option<String>,

        /// Read the text from a file instead.
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Language tag forwarded with the request.
        #[arg(short, long, default_value = "zh")]
        language: String,

        /// Leave classification out of the output.
        #[arg(long)]
        no_classification: bool,

        /// Leave entities out of the output.
        #[arg(long)]
        no_entities: bool,

        /// Leave the summary out of the output.
        #[arg(long)]
        no_summary: bool,
    },

    /// Start the HTTP API server.
    Serve,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            text,
            file,
            language,
            no_classification,
            no_entities,
            no_summary,
        } => {
            let request = AnalysisRequest {
                include_classification: !no_classification,
                include_entities: !no_entities,
                include_summary: !no_summary,
                language,
                ..AnalysisRequest::new(read_input(text, file.as_deref())?)
            };
            analyze_command(request).await
        }
        Commands::Serve => serve_command().await,
    }
}

/// Resolve the input text from the argument, a file, or stdin.
fn read_input(text: Option<String>, file: Option<&Path>) -> anyhow::Result<String> {
    let text = if let Some(text) = text {
        text
    } else if let Some(file) = file {
        std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?
    } else {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(PipelineError::InvalidInput("no text to analyze".into()).into());
    }
    Ok(text)
}

/// Execute the analyze command.
async fn analyze_command(request: AnalysisRequest) -> anyhow::Result<()> {
    let config = LlmConfig::from_env()?;
    let client = OpenAiClient::new(&config)?;
    let analyzer = Analyzer::new(&client, &config);

    println!(
        "{} {} characters with {}",
        style("Analyzing").bold(),
        style(request.text.chars().count()).cyan(),
        style(&config.model).green()
    );
    println!();

    // Create progress spinner
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Waiting for the model...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let response = match analyzer.analyze(&request).await {
        Ok(response) => response,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };
    pb.finish_and_clear();

    if let Some(ref classification) = response.classification {
        println!(
            "  {} {}",
            style("Classification:").bold(),
            style(classification).cyan()
        );
    }
    if let Some(ref entities) = response.entities {
        println!("  {} {}", style("Entities:").bold(), entities.join(", "));
    }
    if let Some(ref summary) = response.summary {
        println!("  {} {}", style("Summary:").bold(), summary);
    }
    println!(
        "  {} {:.2}s",
        style("Processing time:").bold(),
        response.processing_time
    );

    Ok(())
}

/// Execute the serve command.
async fn serve_command() -> anyhow::Result<()> {
    let app_config = AppConfig::from_env()?;
    let llm_config = LlmConfig::from_env()?;
    let client = OpenAiClient::new(&llm_config)?;

    let state = AppState::new(Arc::new(client), llm_config);
    server::serve(&app_config, state).await?;
    Ok(())
}
