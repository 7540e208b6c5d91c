//! Default configuration values, shared between serde defaults and
//! `Default` impls.

use super::logging::LogFormat;

/// Default listen port, matching the original deployment's fallback.
pub fn default_port() -> u16 {
    3000
}

pub fn default_max_message_size() -> usize {
    65536 // 64KB; SDP offers are a few KB at most
}

pub fn default_max_connections_per_ip() -> usize {
    16
}

pub fn default_outbound_queue_size() -> usize {
    64
}

pub fn default_cors_origins() -> String {
    "*".to_string()
}

pub fn default_log_dir() -> String {
    "logs".to_string()
}

pub fn default_log_filename() -> String {
    "relay.log".to_string()
}

pub fn default_rotation() -> String {
    "daily".to_string()
}

pub fn default_enable_file_logging() -> bool {
    false
}

pub fn default_log_format() -> LogFormat {
    LogFormat::Text
}
