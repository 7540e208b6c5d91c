use serde::{Deserialize, Serialize};

use super::error_codes::ErrorCode;
use super::types::PeerId;

/// Message types sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Join a room, creating it if absent. Joining while already in a room
    /// implicitly leaves the previous room first.
    JoinRoom { room_id: String },
    /// Opaque SDP/ICE payload for one peer. The relay never inspects the
    /// `signal` value; it is forwarded verbatim.
    Signal {
        to: PeerId,
        signal: serde_json::Value,
    },
    /// Leave the current room
    LeaveRoom,
    /// Application-level heartbeat
    Ping,
}

/// Message types sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// A peer is now in your room. Sent to existing members when a peer
    /// joins, and to the newcomer once per member already present.
    PeerJoined { peer_id: PeerId },
    /// A peer left your room (explicitly or by disconnecting)
    PeerLeft { peer_id: PeerId },
    /// Relayed opaque payload from another peer
    Signal {
        from: PeerId,
        signal: serde_json::Value,
    },
    /// Pong response to ping
    Pong,
    /// Advisory relay-level failure notice. Best-effort only; the relay
    /// never blocks on or confirms its delivery.
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        error_code: Option<ErrorCode>,
    },
}
