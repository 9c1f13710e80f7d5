use std::net::{IpAddr, SocketAddr};

use crate::error::{PipelineError, Result};

/// Configuration for the HTTP server.
///
/// The rate-limit fields are read and carried but not enforced anywhere;
/// they exist for parity with the deployment environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub log_level: String,
    pub rate_limit_requests: u32,
    pub rate_limit_window_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port = match std::env::var("APP_PORT") {
            Ok(v) => v
                .parse()
                .map_err(|_| PipelineError::Config(format!("invalid APP_PORT: {v}")))?,
            Err(_) => 8000,
        };

        let debug = std::env::var("APP_DEBUG")
            .ok()
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());

        let rate_limit_requests = std::env::var("RATE_LIMIT_REQUESTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);

        let rate_limit_window_secs = std::env::var("RATE_LIMIT_WINDOW")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        Ok(Self {
            host,
            port,
            debug,
            log_level,
            rate_limit_requests,
            rate_limit_window_secs,
        })
    }

    /// Resolve the configured host and port into a bindable socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| PipelineError::Config(format!("invalid APP_HOST: {}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            debug: false,
            log_level: "info".into(),
            rate_limit_requests: 100,
            rate_limit_window_secs: 60,
        }
    }
}
