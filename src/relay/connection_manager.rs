use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::metrics::RelayMetrics;
use crate::protocol::{PeerId, ServerMessage};

use super::RegisterPeerError;

#[derive(Debug, Clone)]
pub(crate) struct PeerConnection {
    /// Key of the room this peer currently occupies, if any
    pub room: Option<String>,
    pub sender: mpsc::Sender<Arc<ServerMessage>>,
    pub client_addr: SocketAddr,
    pub connected_at: chrono::DateTime<chrono::Utc>,
}

pub(crate) struct ConnectionManager {
    peers: DashMap<PeerId, PeerConnection>,
    connections_per_ip: DashMap<IpAddr, usize>,
    metrics: Arc<RelayMetrics>,
    max_connections_per_ip: usize,
}

impl ConnectionManager {
    pub fn new(max_connections_per_ip: usize, metrics: Arc<RelayMetrics>) -> Self {
        Self {
            peers: DashMap::new(),
            connections_per_ip: DashMap::new(),
            metrics,
            max_connections_per_ip,
        }
    }

    pub fn register_peer(
        &self,
        sender: mpsc::Sender<Arc<ServerMessage>>,
        client_addr: SocketAddr,
    ) -> Result<PeerId, RegisterPeerError> {
        let ip = client_addr.ip();
        if let Err(current) = self.try_reserve_ip_slot(ip) {
            warn!(
                %ip,
                current,
                max = self.max_connections_per_ip,
                "IP connection limit exceeded"
            );
            return Err(RegisterPeerError::IpLimitExceeded {
                current,
                limit: self.max_connections_per_ip,
            });
        }

        let peer_id = Uuid::new_v4();
        let connection = PeerConnection {
            room: None,
            sender,
            client_addr,
            connected_at: chrono::Utc::now(),
        };

        self.peers.insert(peer_id, connection);
        self.metrics.increment_connections();

        info!(%peer_id, client_addr = %client_addr, "Peer registered");
        Ok(peer_id)
    }

    pub fn connect_test_peer(
        &self,
        peer_id: PeerId,
        sender: mpsc::Sender<Arc<ServerMessage>>,
        client_addr: SocketAddr,
    ) {
        let connection = PeerConnection {
            room: None,
            sender,
            client_addr,
            connected_at: chrono::Utc::now(),
        };

        self.increment_ip_slot_unbounded(client_addr.ip());
        self.peers.insert(peer_id, connection);
        self.metrics.increment_connections();
    }

    /// Point the peer at its new room. The room table itself is owned by the
    /// relay; this is the per-peer back-reference used on leave/disconnect.
    pub fn assign_room(&self, peer_id: &PeerId, room_id: String) {
        if let Some(mut peer) = self.peers.get_mut(peer_id) {
            peer.room = Some(room_id);
        }
    }

    /// Take the peer's room pointer, leaving it room-less. Returns `None`
    /// when the peer is unknown or was not in a room, making leave paths
    /// idempotent.
    pub fn clear_room(&self, peer_id: &PeerId) -> Option<String> {
        self.peers.get_mut(peer_id).and_then(|mut peer| peer.room.take())
    }

    pub fn peer_room(&self, peer_id: &PeerId) -> Option<String> {
        self.peers.get(peer_id).and_then(|peer| peer.room.clone())
    }

    pub fn has_peer(&self, peer_id: &PeerId) -> bool {
        self.peers.contains_key(peer_id)
    }

    /// Enqueue a message on the peer's outbound queue without waiting.
    /// A full queue or a departed peer drops the message; delivery is
    /// best-effort by contract.
    pub fn try_send(&self, peer_id: &PeerId, message: Arc<ServerMessage>) {
        let Some(peer) = self.peers.get(peer_id) else {
            return;
        };

        if peer.sender.try_send(message).is_err() {
            self.metrics.increment_messages_dropped();
            warn!(%peer_id, "Outbound queue full or closed, message dropped");
        }
    }

    pub fn remove_peer(&self, peer_id: &PeerId) -> Option<PeerConnection> {
        self.peers.remove(peer_id).map(|(_, connection)| {
            self.release_ip_slot(connection.client_addr.ip());
            connection
        })
    }

    fn try_reserve_ip_slot(&self, ip: IpAddr) -> Result<usize, usize> {
        match self.connections_per_ip.entry(ip) {
            dashmap::mapref::entry::Entry::Occupied(mut entry) => {
                let current = *entry.get();
                if current >= self.max_connections_per_ip {
                    Err(current)
                } else {
                    let count = entry.get_mut();
                    *count += 1;
                    Ok(*count)
                }
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                if self.max_connections_per_ip == 0 {
                    Err(0)
                } else {
                    entry.insert(1);
                    Ok(1)
                }
            }
        }
    }

    fn increment_ip_slot_unbounded(&self, ip: IpAddr) -> usize {
        if let Some(mut entry) = self.connections_per_ip.get_mut(&ip) {
            *entry += 1;
            *entry
        } else {
            self.connections_per_ip.insert(ip, 1);
            1
        }
    }

    fn release_ip_slot(&self, ip: IpAddr) {
        if let Some(mut entry) = self.connections_per_ip.get_mut(&ip) {
            if *entry > 1 {
                *entry -= 1;
                return;
            }
        }
        self.connections_per_ip.remove(&ip);
    }
}
