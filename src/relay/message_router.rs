use crate::protocol::{ClientMessage, PeerId, ServerMessage};
use std::sync::Arc;

use super::SignalingRelay;

impl SignalingRelay {
    /// Handle one parsed inbound message for a connected peer.
    pub async fn handle_client_message(&self, peer_id: &PeerId, message: ClientMessage) {
        match message {
            ClientMessage::JoinRoom { room_id } => {
                self.handle_join_room(peer_id, room_id).await;
            }
            ClientMessage::Signal { to, signal } => {
                self.handle_signal(peer_id, to, signal);
            }
            ClientMessage::LeaveRoom => {
                self.leave_room(peer_id).await;
            }
            ClientMessage::Ping => {
                self.send_to_peer(peer_id, Arc::new(ServerMessage::Pong));
            }
        }
    }
}
