//! Server configuration from command-line flags and `PDFMERGE_*` variables.

use axum::http::HeaderValue;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{ServerError, ServerResult};

const DEFAULT_LOG_FILTER: &str = "pdfmerge=info,pdfmerge_server=info,tower_http=info";

/// Server configuration
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "pdfmerge-server")]
#[command(version)]
#[command(about = "HTTP API for validating and merging uploaded PDF files", long_about = None)]
pub struct ServerConfig {
    /// Address to bind to
    #[arg(long, env = "PDFMERGE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PDFMERGE_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Origins allowed to call the API from a browser (comma-separated)
    #[arg(
        long = "allowed-origins",
        env = "PDFMERGE_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Maximum request body size in MB
    #[arg(long, env = "PDFMERGE_MAX_UPLOAD_MB", default_value_t = 100)]
    pub max_upload_mb: usize,

    /// Request timeout in seconds
    #[arg(long, env = "PDFMERGE_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, env = "PDFMERGE_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            max_upload_mb: 100,
            timeout_secs: 120,
            log_level: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServerConfig {
    /// Check values clap cannot check on its own.
    pub fn validate(&self) -> ServerResult<()> {
        if self.max_upload_mb == 0 {
            return Err(ServerError::Config(
                "Maximum upload size must be at least 1 MB".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ServerError::Config(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        self.cors_origins()?;
        self.socket_addr()?;
        Ok(())
    }

    /// Get socket address for binding
    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(ServerError::from)
    }

    /// Allowed origins as header values.
    pub fn cors_origins(&self) -> ServerResult<Vec<HeaderValue>> {
        self.allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                if origin == "*" {
                    return Err(ServerError::Config(
                        "Wildcard CORS origin cannot be used with credentials".to_string(),
                    ));
                }
                HeaderValue::from_str(origin)
                    .map_err(|_| ServerError::Config(format!("Invalid CORS origin: {origin}")))
            })
            .collect()
    }

    /// Request body limit in bytes.
    pub fn body_limit(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
