//! Pairing Core
//!
//! The matchmaking state machine: per-interest waiting queues, the symmetric
//! active-pair table, and the service that executes find-or-wait matching,
//! message/signaling relay, and disconnect cleanup.
//!
//! All mutable state lives behind [`PairingService`]; the structures in
//! [`table`] expose only invariant-preserving operations.

mod interest;
mod service;
mod table;

pub use interest::Interest;
pub use service::PairingService;
pub use table::{PairTable, WaitingQueues};

/// Opaque per-connection session identifier, supplied by the transport layer.
///
/// The core never generates or parses these; it only compares them.
pub type SessionId = String;
