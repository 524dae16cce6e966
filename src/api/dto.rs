//! API Data Transfer Objects

use serde::Serialize;

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status string.
    pub status: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
    /// Crate version.
    pub version: String,
    /// Live WebSocket connections.
    pub connections: usize,
    /// Sessions waiting for a partner.
    pub waiting: usize,
    /// Currently active pairs.
    pub active_pairs: usize,
}
