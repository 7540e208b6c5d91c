use serde::{Deserialize, Serialize};
use std::fmt;

/// Error codes for structured error handling.
///
/// Attached to advisory `error` frames so clients can branch without parsing
/// the human-readable message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The frame was not valid JSON or not a recognized message shape
    InvalidMessage,
    /// The frame exceeded the configured size limit
    MessageTooLarge,
    /// The client IP has too many concurrent connections
    TooManyConnections,
}

impl ErrorCode {
    /// Returns a human-readable description of this error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidMessage => {
                "The message could not be parsed. Frames must be JSON objects with a recognized type."
            }
            Self::MessageTooLarge => {
                "The message exceeds the relay's frame size limit and was dropped."
            }
            Self::TooManyConnections => {
                "Your IP address has too many concurrent signaling connections."
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
