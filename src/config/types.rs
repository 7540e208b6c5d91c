//! Root configuration types.

use super::defaults::default_port;
use super::logging::LoggingConfig;
use super::relay::RelayConfig;
use serde::{Deserialize, Serialize};

/// Root configuration struct for the signaling relay.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            relay: RelayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
