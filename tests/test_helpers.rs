use emotisound_signaling::config::RelayConfig;
use emotisound_signaling::protocol::{PeerId, ServerMessage};
use emotisound_signaling::relay::SignalingRelay;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Create a relay with limits sized for integration tests
#[allow(dead_code)]
pub fn create_test_relay() -> Arc<SignalingRelay> {
    create_test_relay_with_config(test_relay_config())
}

/// Create a relay with custom configuration
#[allow(dead_code)]
pub fn create_test_relay_with_config(config: RelayConfig) -> Arc<SignalingRelay> {
    SignalingRelay::new(config)
}

/// Default relay configuration optimized for testing
#[allow(dead_code)]
pub fn test_relay_config() -> RelayConfig {
    RelayConfig {
        max_message_size: 65536,
        max_connections_per_ip: 100, // Generous for tests
        outbound_queue_size: 64,
        cors_origins: "*".to_string(),
    }
}

/// Register a peer backed by an in-memory channel, returning its id and the
/// receiving end of its outbound queue
#[allow(dead_code)]
pub fn connect_peer(relay: &SignalingRelay) -> (PeerId, mpsc::Receiver<Arc<ServerMessage>>) {
    let (tx, rx) = mpsc::channel(64);
    let peer_id = relay
        .register_peer(tx, "127.0.0.1:0".parse().unwrap())
        .expect("Failed to register test peer");
    (peer_id, rx)
}

/// Drain every message currently queued for a peer
#[allow(dead_code)]
pub fn drain(rx: &mut mpsc::Receiver<Arc<ServerMessage>>) -> Vec<Arc<ServerMessage>> {
    let mut messages = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        messages.push(msg);
    }
    messages
}
