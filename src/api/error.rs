//! API Error Types
//!
//! Errors surfaced by the server entry points. Handler-level failures do not
//! exist in this API: the WebSocket protocol reports its own errors in-band
//! and the health routes are infallible.

use thiserror::Error;

/// API error types.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error (typically a failed bind).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
