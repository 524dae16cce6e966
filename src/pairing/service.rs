//! Pairing Service
//!
//! Matchmaking, relay, and lifecycle cleanup over shared state.
//!
//! One mutex guards both the waiting queues and the pair table, and every
//! operation holds it from first read through the last emitted event.
//! Inbound events therefore apply one at a time; a match, relay, or cleanup
//! never observes a half-applied peer operation, which is what the symmetry
//! and membership invariants rely on.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::websocket::{ConnectionHub, MessageSender, ServerEvent};

use super::table::{PairTable, WaitingQueues};
use super::{Interest, SessionId};

/// Status text sent with the `waiting` event.
const WAITING_MESSAGE: &str = "Waiting for another user...";

/// Matchmaking state: who is waiting, who is paired.
#[derive(Debug, Default)]
struct PairState {
    waiting: WaitingQueues,
    pairs: PairTable,
}

/// Executes pairing, relay, and cleanup operations against shared state and
/// emits the resulting events through the connection hub.
///
/// Emission is best-effort: a session that vanished mid-operation simply
/// misses the event, it never fails the operation.
pub struct PairingService {
    state: Mutex<PairState>,
    hub: Arc<ConnectionHub>,
}

impl PairingService {
    pub fn new(hub: Arc<ConnectionHub>) -> Self {
        Self {
            state: Mutex::new(PairState::default()),
            hub,
        }
    }

    /// Pair `session_id` with the earliest compatible waiting session, or
    /// queue it under `interest` if nobody compatible is waiting.
    ///
    /// Tolerates duplicate requests: an already-paired caller gets its
    /// `partner_found` again, an already-queued caller stays queued (or
    /// moves to the new interest).
    pub async fn find_partner(&self, session_id: &str, interest: Option<&str>) {
        let interest = Interest::parse(interest);
        let mut state = self.state.lock().await;

        if let Some(partner_id) = state.pairs.partner_of(session_id).cloned() {
            tracing::debug!(
                session_id = %session_id,
                partner_id = %partner_id,
                "find_partner from an already-paired session"
            );
            self.emit(session_id, ServerEvent::PartnerFound { partner_id })
                .await;
            return;
        }

        match state.waiting.claim_first(&interest, session_id) {
            Some(partner_id) => {
                // Purge both parties from every queue before linking so
                // neither is simultaneously queued and paired.
                state.waiting.remove(session_id);
                state.waiting.remove(&partner_id);
                state.pairs.link(session_id, &partner_id);

                tracing::info!(
                    session_id = %session_id,
                    partner_id = %partner_id,
                    interest = %interest,
                    "matched"
                );

                self.emit(
                    session_id,
                    ServerEvent::PartnerFound {
                        partner_id: partner_id.clone(),
                    },
                )
                .await;
                self.emit(
                    &partner_id,
                    ServerEvent::PartnerFound {
                        partner_id: session_id.to_string(),
                    },
                )
                .await;
            }
            None => {
                if state.waiting.enqueue(&interest, session_id) {
                    tracing::debug!(
                        session_id = %session_id,
                        interest = %interest,
                        "queued"
                    );
                }
                self.emit(
                    session_id,
                    ServerEvent::Waiting {
                        message: WAITING_MESSAGE.to_string(),
                    },
                )
                .await;
            }
        }
    }

    /// Relay chat text to the partner, echoing it back to the sender so
    /// clients render both directions through one path.
    ///
    /// Silently dropped when the sender is unpaired.
    pub async fn relay_message(&self, session_id: &str, text: &str) {
        let state = self.state.lock().await;
        let Some(partner_id) = state.pairs.partner_of(session_id) else {
            tracing::trace!(session_id = %session_id, "dropping message from unpaired session");
            return;
        };

        self.emit(
            partner_id,
            ServerEvent::ReceiveMessage {
                sender: MessageSender::Partner,
                text: text.to_string(),
            },
        )
        .await;
        self.emit(
            session_id,
            ServerEvent::ReceiveMessage {
                sender: MessageSender::Me,
                text: text.to_string(),
            },
        )
        .await;
    }

    /// Forward a WebRTC offer to the partner. The payload is opaque.
    pub async fn forward_offer(&self, session_id: &str, offer: Value) {
        let state = self.state.lock().await;
        let Some(partner_id) = state.pairs.partner_of(session_id) else {
            tracing::trace!(session_id = %session_id, "dropping offer from unpaired session");
            return;
        };

        self.emit(
            partner_id,
            ServerEvent::Offer {
                from: session_id.to_string(),
                offer,
            },
        )
        .await;
    }

    /// Forward a WebRTC answer to the explicit target the answering side is
    /// addressing (the offerer it learned from `partner_found`).
    ///
    /// The target must be the caller's current partner; an empty, stale, or
    /// forged target is dropped.
    pub async fn forward_answer(&self, session_id: &str, to: &str, answer: Value) {
        if to.is_empty() {
            tracing::debug!(session_id = %session_id, "dropping answer with empty target");
            return;
        }

        let state = self.state.lock().await;
        match state.pairs.partner_of(session_id) {
            Some(partner_id) if partner_id == to => {
                self.emit(
                    to,
                    ServerEvent::Answer {
                        from: session_id.to_string(),
                        answer,
                    },
                )
                .await;
            }
            _ => {
                tracing::warn!(
                    session_id = %session_id,
                    target = %to,
                    "dropping answer addressed to a session that is not the current partner"
                );
            }
        }
    }

    /// Forward an ICE candidate to the partner. The payload is opaque.
    pub async fn forward_ice_candidate(&self, session_id: &str, candidate: Value) {
        let state = self.state.lock().await;
        let Some(partner_id) = state.pairs.partner_of(session_id) else {
            tracing::trace!(session_id = %session_id, "dropping candidate from unpaired session");
            return;
        };

        self.emit(
            partner_id,
            ServerEvent::IceCandidate {
                from: session_id.to_string(),
                candidate,
            },
        )
        .await;
    }

    /// Ask the partner to stop sending video. No payload.
    pub async fn forward_stop_video(&self, session_id: &str) {
        let state = self.state.lock().await;
        let Some(partner_id) = state.pairs.partner_of(session_id) else {
            return;
        };

        self.emit(partner_id, ServerEvent::StopVideo).await;
    }

    /// Explicit departure from the current chat.
    pub async fn leave(&self, session_id: &str) {
        tracing::debug!(session_id = %session_id, "left chat");
        self.unwind(session_id).await;
    }

    /// Implicit departure: the connection closed.
    pub async fn disconnect(&self, session_id: &str) {
        tracing::info!(session_id = %session_id, "session disconnected, unwinding");
        self.unwind(session_id).await;
    }

    /// Remove every trace of `session_id` and notify a former partner.
    ///
    /// Total and idempotent: afterwards the session is in no queue and no
    /// pair, and a second call emits nothing.
    async fn unwind(&self, session_id: &str) {
        let mut state = self.state.lock().await;
        let partner_id = state.pairs.unlink(session_id);
        state.waiting.remove(session_id);

        if let Some(partner_id) = partner_id {
            self.emit(&partner_id, ServerEvent::PartnerDisconnected).await;
        }
    }

    /// Current partner of `session_id`, if any.
    pub async fn partner_of(&self, session_id: &str) -> Option<SessionId> {
        self.state.lock().await.pairs.partner_of(session_id).cloned()
    }

    /// Sessions currently waiting, across all interests.
    pub async fn waiting_count(&self) -> usize {
        self.state.lock().await.waiting.waiting_count()
    }

    /// Currently active pairs.
    pub async fn active_pair_count(&self) -> usize {
        self.state.lock().await.pairs.active_count()
    }

    async fn emit(&self, session_id: &str, event: ServerEvent) {
        if let Err(e) = self.hub.send_to(session_id, event).await {
            tracing::debug!(
                session_id = %session_id,
                error = %e,
                "dropping event for unreachable session"
            );
        }
    }
}
