//! pdfmerge-server - HTTP API for validating and merging uploaded PDF files.
//!
//! # API Endpoints
//!
//! - `GET /` - Service banner
//! - `GET /health` - Liveness probe
//! - `POST /validate-files` - Per-file validity of multipart `files` uploads
//! - `POST /merge-pdfs` - Merge two or more multipart `files` uploads
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pdfmerge_server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     pdfmerge_server::start_server(ServerConfig::default()).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod upload;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
