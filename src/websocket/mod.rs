//! WebSocket Transport
//!
//! Persistent per-connection channels carrying the named events defined in
//! [`messages`].
//!
//! ## Architecture
//!
//! - **ConnectionHub**: registry of live connections and their outbound
//!   channels
//! - **Handler**: WebSocket upgrade and the per-connection event loop
//! - **Messages**: client and server event formats
//!
//! Clients connect to `/ws`, receive a `connected` event carrying their
//! session identifier, and drive everything else through the events in
//! [`ClientEvent`].
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:5000/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'find_partner', interest: 'music'}));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   console.log('Received:', msg);
//! };
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, ConnectionId, HubConfig, HubError};
pub use messages::{ClientEvent, MessageSender, ServerEvent};
