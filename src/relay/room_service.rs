use super::SignalingRelay;
use crate::protocol::{PeerId, ServerMessage};
use std::sync::Arc;

impl SignalingRelay {
    /// Join a room, creating it on first use.
    ///
    /// Joining while already in a room (the same one included) implicitly
    /// leaves the previous room first, with the usual `peer-left`
    /// notifications. An empty room id is dropped without a reply.
    ///
    /// Every member present when the join is processed receives one
    /// `peer-joined` carrying the newcomer's id, and the newcomer receives
    /// one `peer-joined` per existing member, so each side of a pair learns
    /// of the other exactly once and can independently start peer-connection
    /// setup.
    pub async fn handle_join_room(&self, peer_id: &PeerId, room_id: String) {
        if room_id.is_empty() {
            tracing::debug!(%peer_id, "Ignoring join with empty room id");
            return;
        }

        if !self.connections.has_peer(peer_id) {
            tracing::debug!(%peer_id, "Ignoring join from unknown peer");
            return;
        }

        if self.connections.peer_room(peer_id).is_some() {
            self.leave_room(peer_id).await;
        }

        {
            let mut rooms = self.rooms.write().await;
            let members = rooms.entry(room_id.clone()).or_default();

            for member in members.iter() {
                self.connections
                    .try_send(member, Arc::new(ServerMessage::PeerJoined { peer_id: *peer_id }));
                self.connections
                    .try_send(peer_id, Arc::new(ServerMessage::PeerJoined { peer_id: *member }));
            }

            members.insert(*peer_id);
            self.connections.assign_room(peer_id, room_id.clone());
            // Membership, the peer's room pointer, and the notifications are
            // all updated under the write guard: later joins cannot
            // interleave, so members see newcomers in processing order.
        }

        self.metrics.increment_peers_joined();
        tracing::info!(%peer_id, room = %room_id, "Peer joined room");
    }

    /// Remove the peer from its room, if it is in one.
    ///
    /// Remaining members each receive one `peer-left`; a room left empty is
    /// removed from the table. Safe to call for room-less peers, so the
    /// disconnect path reuses it unconditionally.
    pub async fn leave_room(&self, peer_id: &PeerId) {
        let mut rooms = self.rooms.write().await;

        let Some(room_id) = self.connections.clear_room(peer_id) else {
            return;
        };

        let Some(members) = rooms.get_mut(&room_id) else {
            tracing::warn!(%peer_id, room = %room_id, "Peer pointed at a room missing from the table");
            return;
        };

        if !members.remove(peer_id) {
            return;
        }

        if members.is_empty() {
            rooms.remove(&room_id);
            tracing::debug!(room = %room_id, "Removed empty room");
        } else {
            for member in members.iter() {
                self.connections
                    .try_send(member, Arc::new(ServerMessage::PeerLeft { peer_id: *peer_id }));
            }
        }
        drop(rooms);

        self.metrics.increment_peers_left();
        tracing::info!(%peer_id, room = %room_id, "Peer left room");
    }
}
