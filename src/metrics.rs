use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Relay counters, updated with relaxed atomics on the hot path and read
/// as a point-in-time snapshot by the `/metrics` endpoint.
#[derive(Debug, Default)]
pub struct RelayMetrics {
    active_connections: AtomicU64,
    total_connections: AtomicU64,
    peers_joined: AtomicU64,
    peers_left: AtomicU64,
    signals_relayed: AtomicU64,
    messages_dropped: AtomicU64,
}

impl RelayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_connections(&self) {
        self.active_connections.fetch_add(1, Ordering::Relaxed);
        self.total_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decrement_active_connections(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn increment_peers_joined(&self) {
        self.peers_joined.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_peers_left(&self) {
        self.peers_left.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_signals_relayed(&self) {
        self.signals_relayed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_messages_dropped(&self) {
        self.messages_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, open_rooms: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            active_connections: self.active_connections.load(Ordering::Relaxed),
            total_connections: self.total_connections.load(Ordering::Relaxed),
            open_rooms,
            peers_joined: self.peers_joined.load(Ordering::Relaxed),
            peers_left: self.peers_left.load(Ordering::Relaxed),
            signals_relayed: self.signals_relayed.load(Ordering::Relaxed),
            messages_dropped: self.messages_dropped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the relay counters, rendered as JSON at `/metrics`.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub active_connections: u64,
    pub total_connections: u64,
    pub open_rooms: usize,
    pub peers_joined: u64,
    pub peers_left: u64,
    pub signals_relayed: u64,
    pub messages_dropped: u64,
}
