use super::SignalingRelay;
use crate::protocol::{ErrorCode, PeerId, ServerMessage};
use std::sync::Arc;

impl SignalingRelay {
    /// Forward an opaque signaling payload to one peer, tagged with the
    /// sender's id.
    ///
    /// Delivery is at-most-once with no confirmation: a target that is
    /// unknown or already gone drops the message without informing the
    /// sender, whose peer-connection layer detects failure through its own
    /// connection-state timeouts. A sender outside any room is treated as
    /// malformed input and dropped the same way.
    pub fn handle_signal(&self, peer_id: &PeerId, to: PeerId, signal: serde_json::Value) {
        if self.connections.peer_room(peer_id).is_none() {
            tracing::debug!(%peer_id, "Dropping signal from peer outside any room");
            return;
        }

        if !self.connections.has_peer(&to) {
            tracing::debug!(%peer_id, target = %to, "Dropping signal for unknown peer");
            return;
        }

        self.send_to_peer(
            &to,
            Arc::new(ServerMessage::Signal {
                from: *peer_id,
                signal,
            }),
        );
        self.metrics.increment_signals_relayed();
    }

    /// Enqueue a message for one peer, fire-and-forget.
    pub(crate) fn send_to_peer(&self, peer_id: &PeerId, message: Arc<ServerMessage>) {
        self.connections.try_send(peer_id, message);
    }

    /// Send an advisory error frame to a peer. Never blocks the relay and
    /// never affects room state.
    pub fn send_error_to_peer(
        &self,
        peer_id: &PeerId,
        message: String,
        error_code: Option<ErrorCode>,
    ) {
        self.send_to_peer(
            peer_id,
            Arc::new(ServerMessage::Error {
                message,
                error_code,
            }),
        );
    }
}
