use crate::config::RelayConfig;
use crate::metrics::{MetricsSnapshot, RelayMetrics};
use crate::protocol::{PeerId, ServerMessage};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};

mod connection_manager;
mod message_router;
mod messaging;
mod room_service;

use connection_manager::ConnectionManager;

/// The signaling relay: a connection registry plus the room table.
///
/// The relay routes small JSON control messages between peers so they can
/// negotiate a direct media path; it never interprets the payloads it
/// forwards and never owns peer-connection state.
pub struct SignalingRelay {
    /// Connection registry (peer queues, room pointers, IP accounting)
    connections: ConnectionManager,
    /// Room table: room key -> member peer ids. Membership changes and the
    /// notifications they trigger happen under the write guard, so every
    /// member observes them in server-processing order.
    rooms: RwLock<HashMap<String, HashSet<PeerId>>>,
    /// Relay configuration
    config: RelayConfig,
    /// Relay counters
    metrics: Arc<RelayMetrics>,
}

#[derive(Debug, Error)]
pub enum RegisterPeerError {
    #[error("Too many connections from your IP ({current}/{limit})")]
    IpLimitExceeded { current: usize, limit: usize },
}

impl SignalingRelay {
    pub fn new(config: RelayConfig) -> Arc<Self> {
        let metrics = Arc::new(RelayMetrics::new());
        let connections = ConnectionManager::new(config.max_connections_per_ip, metrics.clone());

        Arc::new(Self {
            connections,
            rooms: RwLock::new(HashMap::new()),
            config,
            metrics,
        })
    }

    /// Register a new peer connection. The returned id identifies the peer
    /// for the lifetime of the connection.
    pub fn register_peer(
        &self,
        sender: mpsc::Sender<Arc<ServerMessage>>,
        client_addr: SocketAddr,
    ) -> Result<PeerId, RegisterPeerError> {
        self.connections.register_peer(sender, client_addr)
    }

    /// Connect a peer with a specific id, bypassing the per-IP cap
    /// (used for testing).
    pub fn connect_test_peer(&self, peer_id: PeerId, sender: mpsc::Sender<Arc<ServerMessage>>) {
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        self.connections.connect_test_peer(peer_id, sender, addr);
    }

    /// Tear down a peer connection: leave its room (notifying remaining
    /// members) and drop it from the registry. Runs on any transport close
    /// and is safe to call more than once.
    pub async fn unregister_peer(&self, peer_id: &PeerId) {
        self.leave_room(peer_id).await;

        if let Some(connection) = self.connections.remove_peer(peer_id) {
            self.metrics.decrement_active_connections();
            let session = chrono::Utc::now() - connection.connected_at;
            tracing::info!(
                %peer_id,
                session_secs = session.num_seconds(),
                "Peer unregistered"
            );
        }
    }

    /// The room the peer currently occupies, if any.
    pub fn peer_room(&self, peer_id: &PeerId) -> Option<String> {
        self.connections.peer_room(peer_id)
    }

    /// Current members of a room, or `None` once the room has been removed
    /// from the table.
    pub async fn room_members(&self, room_id: &str) -> Option<Vec<PeerId>> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .map(|members| members.iter().copied().collect())
    }

    /// Snapshot of the whole room table.
    pub async fn rooms_snapshot(&self) -> Vec<(String, Vec<PeerId>)> {
        self.rooms
            .read()
            .await
            .iter()
            .map(|(room_id, members)| (room_id.clone(), members.iter().copied().collect()))
            .collect()
    }

    /// Point-in-time counters for the `/metrics` endpoint.
    pub async fn metrics_snapshot(&self) -> MetricsSnapshot {
        let open_rooms = self.rooms.read().await.len();
        self.metrics.snapshot(open_rooms)
    }

    /// Relay configuration.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Relay counters.
    pub fn metrics(&self) -> Arc<RelayMetrics> {
        self.metrics.clone()
    }
}
