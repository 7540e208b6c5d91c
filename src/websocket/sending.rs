use crate::protocol::{PeerId, ServerMessage};
use axum::extract::ws::{Message, WebSocket};
use futures_util::SinkExt;
use std::sync::Arc;

/// Serialize and send one frame before the peer is registered (refusal
/// paths). Surfaces the transport error so the caller can log it.
pub(super) async fn send_immediate_server_message(
    sender: &mut futures_util::stream::SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    let payload = match serde_json::to_string(message) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::error!(error = %err, "Failed to serialize server message");
            "{\"type\":\"error\",\"data\":{\"message\":\"Internal error\"}}".to_string()
        }
    };

    sender.send(Message::Text(payload.into())).await
}

/// Send one queued message to a registered peer. `Err(())` means the
/// connection is gone and the send loop should stop.
pub(super) async fn send_queued_message(
    sender: &mut futures_util::stream::SplitSink<WebSocket, Message>,
    message: Arc<ServerMessage>,
    peer_id: &PeerId,
) -> Result<(), ()> {
    let json_message = match serde_json::to_string(message.as_ref()) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(%peer_id, "Failed to serialize message: {}", e);
            return Ok(());
        }
    };

    if sender
        .send(Message::Text(json_message.into()))
        .await
        .is_err()
    {
        tracing::warn!(%peer_id, "Failed to send message, connection closed");
        return Err(());
    }

    Ok(())
}
