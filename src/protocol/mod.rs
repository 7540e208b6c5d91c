// Protocol module: the signaling message vocabulary and its wire format.
//
// Frames are JSON text, adjacently tagged: {"type": "...", "data": {...}}.
// Type names are kebab-case to match the browser client vocabulary.

pub mod error_codes;
pub mod messages;
pub mod types;

pub use error_codes::ErrorCode;

pub use messages::{ClientMessage, ServerMessage};

pub use types::PeerId;
