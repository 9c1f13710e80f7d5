pub mod analysis;
pub mod config;
pub mod error;
pub mod server;

pub use analysis::{AnalysisRequest, AnalysisResponse, Analyzer, HealthResponse, LlmConfig};
pub use config::AppConfig;
pub use error::PipelineError;
pub use server::AppState;
