//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::config::Config;
use crate::pairing::PairingService;
use crate::websocket::{ConnectionHub, HubConfig};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<Config>,
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Registry of live WebSocket connections.
    pub hub: Arc<ConnectionHub>,
    /// Matchmaking, relay, and lifecycle operations.
    pub pairing: Arc<PairingService>,
}

impl AppState {
    /// Create the application state from loaded configuration.
    pub fn new(config: Config) -> Self {
        let hub = Arc::new(ConnectionHub::new(HubConfig {
            max_connections: config.websocket.max_connections,
        }));
        let pairing = Arc::new(PairingService::new(Arc::clone(&hub)));

        Self {
            config: Arc::new(config),
            start_time: Instant::now(),
            hub,
            pairing,
        }
    }

    /// Get server uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
