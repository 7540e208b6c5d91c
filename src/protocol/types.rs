use uuid::Uuid;

/// Unique identifier for connected peers, assigned by the relay on accept.
pub type PeerId = Uuid;
