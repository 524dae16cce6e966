//! Wire Message Types
//!
//! Defines the named events exchanged with clients over the per-connection
//! WebSocket channel. Two event names predate the snake_case convention
//! ("ice-candidate", "leaveChat") and keep their historical spelling on the
//! wire.
//!
//! Signaling payloads (`offer`, `answer`, `candidate`) are opaque JSON: the
//! server forwards them without parsing, validating, or transforming.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events sent from client to server.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Request pairing, optionally under an interest tag.
    FindPartner {
        #[serde(default)]
        interest: Option<String>,
    },
    /// Chat text for the current partner.
    SendMessage { text: String },
    /// WebRTC offer for the current partner.
    Offer { offer: Value },
    /// WebRTC answer, addressed explicitly to the offering session.
    Answer {
        #[serde(default)]
        to: String,
        answer: Value,
    },
    /// ICE candidate for the current partner.
    #[serde(rename = "ice-candidate")]
    IceCandidate { candidate: Value },
    /// Ask the partner to stop sending video.
    StopVideo,
    /// Explicit departure from the current chat.
    #[serde(rename = "leaveChat")]
    LeaveChat,
}

/// Events sent from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Connection established; carries the session's own identifier.
    Connected { connection_id: String },
    /// Queued; no partner available yet.
    Waiting { message: String },
    /// Pairing established.
    PartnerFound {
        #[serde(rename = "partnerId")]
        partner_id: String,
    },
    /// Relayed or echoed chat text.
    ReceiveMessage { sender: MessageSender, text: String },
    /// Forwarded WebRTC offer.
    Offer { from: String, offer: Value },
    /// Forwarded WebRTC answer.
    Answer { from: String, answer: Value },
    /// Forwarded ICE candidate.
    #[serde(rename = "ice-candidate")]
    IceCandidate { from: String, candidate: Value },
    /// Forwarded request to stop video.
    StopVideo,
    /// The partner left or disconnected.
    PartnerDisconnected,
    /// Transport-level error; the connection stays open.
    Error { message: String },
}

/// Origin tag on relayed chat text, from the receiving client's viewpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    Me,
    Partner,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_find_partner_with_interest() {
        let json = r#"{"type": "find_partner", "interest": "music"}"#;
        let msg: ClientEvent = serde_json::from_str(json).unwrap();
        match msg {
            ClientEvent::FindPartner { interest } => {
                assert_eq!(interest.as_deref(), Some("music"));
            }
            _ => panic!("Expected FindPartner"),
        }
    }

    #[test]
    fn test_client_event_find_partner_without_interest() {
        let json = r#"{"type": "find_partner"}"#;
        let msg: ClientEvent = serde_json::from_str(json).unwrap();
        match msg {
            ClientEvent::FindPartner { interest } => assert!(interest.is_none()),
            _ => panic!("Expected FindPartner"),
        }
    }

    #[test]
    fn test_client_event_historical_names() {
        let json = r#"{"type": "ice-candidate", "candidate": {"sdpMid": "0"}}"#;
        let msg: ClientEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientEvent::IceCandidate { .. }));

        let json = r#"{"type": "leaveChat"}"#;
        let msg: ClientEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientEvent::LeaveChat));
    }

    #[test]
    fn test_client_event_answer_defaults_empty_target() {
        let json = r#"{"type": "answer", "answer": {"sdp": "v=0"}}"#;
        let msg: ClientEvent = serde_json::from_str(json).unwrap();
        match msg {
            ClientEvent::Answer { to, .. } => assert!(to.is_empty()),
            _ => panic!("Expected Answer"),
        }
    }

    #[test]
    fn test_server_event_partner_found_uses_camel_case_field() {
        let msg = ServerEvent::PartnerFound {
            partner_id: "abc-123".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"partner_found\""));
        assert!(json.contains("\"partnerId\":\"abc-123\""));
    }

    #[test]
    fn test_server_event_sender_tags() {
        let mine = ServerEvent::ReceiveMessage {
            sender: MessageSender::Me,
            text: "hi".to_string(),
        };
        let theirs = ServerEvent::ReceiveMessage {
            sender: MessageSender::Partner,
            text: "hi".to_string(),
        };
        assert!(serde_json::to_string(&mine)
            .unwrap()
            .contains("\"sender\":\"me\""));
        assert!(serde_json::to_string(&theirs)
            .unwrap()
            .contains("\"sender\":\"partner\""));
    }

    #[test]
    fn test_server_event_ice_candidate_keeps_wire_name() {
        let msg = ServerEvent::IceCandidate {
            from: "abc".to_string(),
            candidate: serde_json::json!({"sdpMid": "0"}),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"ice-candidate\""));
    }

    #[test]
    fn test_server_event_partner_disconnected_has_no_payload() {
        let msg = ServerEvent::PartnerDisconnected;
        assert_eq!(
            serde_json::to_string(&msg).unwrap(),
            r#"{"type":"partner_disconnected"}"#
        );
    }
}
