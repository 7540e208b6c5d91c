//! Relay behavior configuration types.

use super::defaults::{
    default_cors_origins, default_max_connections_per_ip, default_max_message_size,
    default_outbound_queue_size,
};
use serde::{Deserialize, Serialize};

/// Configuration for connection handling and message limits.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RelayConfig {
    /// Maximum inbound frame size in bytes; oversized frames are dropped
    /// with an advisory error
    #[serde(default = "default_max_message_size")]
    pub max_message_size: usize,
    /// Maximum concurrent signaling connections per client IP
    #[serde(default = "default_max_connections_per_ip")]
    pub max_connections_per_ip: usize,
    /// Capacity of each connection's outbound message queue; sends to a
    /// full queue are dropped, never awaited
    #[serde(default = "default_outbound_queue_size")]
    pub outbound_queue_size: usize,
    /// Comma-separated list of allowed CORS origins, or "*" for permissive
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_message_size: default_max_message_size(),
            max_connections_per_ip: default_max_connections_per_ip(),
            outbound_queue_size: default_outbound_queue_size(),
            cors_origins: default_cors_origins(),
        }
    }
}
