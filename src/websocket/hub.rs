//! WebSocket Connection Hub
//!
//! Registry of live connections. Assigns each connection an opaque unique
//! identifier and routes outbound events to it through a per-connection
//! channel. Pairing state is not kept here; see [`crate::pairing`].

use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::ServerEvent;

/// Unique identifier for a WebSocket connection.
///
/// Doubles as the session identifier in the pairing core.
pub type ConnectionId = String;

/// Configuration for the connection hub.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent connections.
    pub max_connections: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 1000,
        }
    }
}

/// Manages all live WebSocket connections.
pub struct ConnectionHub {
    /// Active connections: ConnectionId → outbound channel.
    connections: RwLock<HashMap<ConnectionId, mpsc::UnboundedSender<ServerEvent>>>,
    config: HubConfig,
}

impl ConnectionHub {
    /// Create a new connection hub.
    pub fn new(config: HubConfig) -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Register a new WebSocket connection.
    ///
    /// Returns the freshly assigned connection ID, or an error if the
    /// connection limit has been reached.
    pub async fn register(
        &self,
        sender: mpsc::UnboundedSender<ServerEvent>,
    ) -> Result<ConnectionId, HubError> {
        let mut connections = self.connections.write().await;
        if connections.len() >= self.config.max_connections {
            return Err(HubError::TooManyConnections(self.config.max_connections));
        }

        let id = Uuid::new_v4().to_string();
        connections.insert(id.clone(), sender);

        tracing::info!(connection_id = %id, "WebSocket connected");
        Ok(id)
    }

    /// Drop a connection from the registry. Idempotent.
    pub async fn unregister(&self, id: &str) {
        if self.connections.write().await.remove(id).is_some() {
            tracing::info!(connection_id = %id, "WebSocket disconnected");
        }
    }

    /// Send an event to a specific connection.
    pub async fn send_to(&self, id: &str, event: ServerEvent) -> Result<(), HubError> {
        let connections = self.connections.read().await;
        let sender = connections.get(id).ok_or(HubError::ConnectionNotFound)?;

        sender.send(event).map_err(|_| HubError::SendFailed)
    }

    /// Get the current connection count.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

/// Errors that can occur in the connection hub.
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many connections (limit: {0})")]
    TooManyConnections(usize),

    #[error("Connection not found")]
    ConnectionNotFound,

    #[error("Failed to send message")]
    SendFailed,
}
