//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and the per-connection event loop.
//! Each inbound event dispatches to exactly one pairing operation and runs
//! to completion before the next frame is processed.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::hub::ConnectionHub;
use super::messages::{ClientEvent, ServerEvent};
use crate::api::AppState;
use crate::pairing::PairingService;

/// WebSocket upgrade handler.
///
/// This is the entry point for client connections. It upgrades the HTTP
/// connection to WebSocket and starts the event loop.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = Arc::clone(&state.hub);
    let pairing = Arc::clone(&state.pairing);
    ws.on_upgrade(move |socket| handle_socket(socket, hub, pairing))
}

/// Handle an established WebSocket connection.
async fn handle_socket(
    socket: WebSocket,
    hub: Arc<ConnectionHub>,
    pairing: Arc<PairingService>,
) {
    let (mut sender, mut receiver) = socket.split();

    // Channel for events addressed to this connection.
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    let session_id = match hub.register(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "rejecting WebSocket connection");
            let error_msg = ServerEvent::Error {
                message: e.to_string(),
            };
            if let Ok(text) = serde_json::to_string(&error_msg) {
                let _ = sender.send(Message::Text(text)).await;
            }
            return;
        }
    };

    // Tell the client its own identifier; answers address peers by id.
    let connected = ServerEvent::Connected {
        connection_id: session_id.clone(),
    };
    let announced = match serde_json::to_string(&connected) {
        Ok(text) => sender.send(Message::Text(text)).await.is_ok(),
        Err(_) => false,
    };
    if !announced {
        tracing::error!(session_id = %session_id, "failed to send connected event");
        hub.unregister(&session_id).await;
        return;
    }

    let send_id = session_id.clone();

    // Task to forward events from the channel to the WebSocket.
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        tracing::debug!(
                            session_id = %send_id,
                            "WebSocket send failed, closing connection"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize event");
                }
            }
        }
    });

    let recv_hub = Arc::clone(&hub);
    let recv_pairing = Arc::clone(&pairing);
    let recv_id = session_id.clone();

    // Task to receive frames from the WebSocket and handle them.
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !handle_ws_message(&recv_hub, &recv_pairing, &recv_id, msg).await {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %recv_id,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    });

    // Wait for either task to complete.
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    // The connection is gone either way: unwind pairing state first so the
    // partner is notified, then drop the registry entry.
    pairing.disconnect(&session_id).await;
    hub.unregister(&session_id).await;
}

/// Handle a received WebSocket frame.
///
/// Returns false if the connection should be closed.
async fn handle_ws_message(
    hub: &Arc<ConnectionHub>,
    pairing: &Arc<PairingService>,
    session_id: &str,
    message: Message,
) -> bool {
    match message {
        Message::Text(text) => {
            match serde_json::from_str::<ClientEvent>(&text) {
                Ok(event) => {
                    dispatch_client_event(pairing, session_id, event).await;
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %session_id,
                        error = %e,
                        "invalid client event"
                    );
                    // Report the parse error but keep the connection open.
                    let error_msg = ServerEvent::Error {
                        message: format!("Invalid message format: {}", e),
                    };
                    let _ = hub.send_to(session_id, error_msg).await;
                }
            }
            true
        }
        Message::Binary(_) => {
            let error_msg = ServerEvent::Error {
                message: "Binary messages not supported".to_string(),
            };
            let _ = hub.send_to(session_id, error_msg).await;
            true
        }
        Message::Ping(_) | Message::Pong(_) => {
            // Axum answers pings itself; a pong just means the peer is alive.
            true
        }
        Message::Close(_) => {
            tracing::debug!(session_id = %session_id, "client requested close");
            false
        }
    }
}

/// Route one parsed client event to its pairing operation.
async fn dispatch_client_event(pairing: &PairingService, session_id: &str, event: ClientEvent) {
    match event {
        ClientEvent::FindPartner { interest } => {
            pairing.find_partner(session_id, interest.as_deref()).await;
        }
        ClientEvent::SendMessage { text } => {
            pairing.relay_message(session_id, &text).await;
        }
        ClientEvent::Offer { offer } => {
            pairing.forward_offer(session_id, offer).await;
        }
        ClientEvent::Answer { to, answer } => {
            pairing.forward_answer(session_id, &to, answer).await;
        }
        ClientEvent::IceCandidate { candidate } => {
            pairing.forward_ice_candidate(session_id, candidate).await;
        }
        ClientEvent::StopVideo => {
            pairing.forward_stop_video(session_id).await;
        }
        ClientEvent::LeaveChat => {
            pairing.leave(session_id).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::websocket::HubConfig;

    #[tokio::test]
    async fn test_dispatch_routes_find_partner() {
        let hub = Arc::new(ConnectionHub::new(HubConfig::default()));
        let pairing = PairingService::new(Arc::clone(&hub));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();

        let event: ClientEvent =
            serde_json::from_str(r#"{"type": "find_partner", "interest": "music"}"#).unwrap();
        dispatch_client_event(&pairing, &id, event).await;

        assert!(matches!(rx.try_recv(), Ok(ServerEvent::Waiting { .. })));
        assert_eq!(pairing.waiting_count().await, 1);
    }

    #[tokio::test]
    async fn test_dispatch_routes_leave_chat() {
        let hub = Arc::new(ConnectionHub::new(HubConfig::default()));
        let pairing = PairingService::new(Arc::clone(&hub));

        let (tx, _rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();

        let find: ClientEvent = serde_json::from_str(r#"{"type": "find_partner"}"#).unwrap();
        dispatch_client_event(&pairing, &id, find).await;

        let leave: ClientEvent = serde_json::from_str(r#"{"type": "leaveChat"}"#).unwrap();
        dispatch_client_event(&pairing, &id, leave).await;

        assert_eq!(pairing.waiting_count().await, 0);
    }
}
