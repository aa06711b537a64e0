//! API route handlers
//!
//! - `health`: Service banner and liveness
//! - `validate`: Per-file validity report for uploads
//! - `merge`: Merge uploads into one PDF

pub mod health;
pub mod merge;
pub mod validate;

use crate::error::ServerError;

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
