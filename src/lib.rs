//! # Tandem
//!
//! Anonymous interest-based pairing and WebRTC signaling relay.
//!
//! Connected clients ask to be paired with a stranger sharing an interest
//! tag; once matched, the server relays chat text and WebRTC signaling
//! payloads between the two until either side leaves or disconnects. There
//! is no identity, no persistence, and no inspection of the relayed
//! payloads.
//!
//! ## Modules
//!
//! - [`pairing`]: the core - waiting queues, pair table, matchmaking service
//! - [`websocket`]: per-connection transport (hub, upgrade handler, events)
//! - [`api`]: axum router and server entry points
//! - [`config`]: TOML config files with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tandem::api::{serve, AppState};
//! use tandem::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = AppState::new(Config::load_default());
//!     serve(state).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod pairing;
pub mod websocket;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiError, ApiResult, AppState};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig, WebSocketConfig};

pub use pairing::{Interest, PairTable, PairingService, SessionId, WaitingQueues};

pub use websocket::{
    websocket_handler, ClientEvent, ConnectionHub, ConnectionId, HubConfig, HubError,
    MessageSender, ServerEvent,
};
