use crate::protocol::{ClientMessage, ErrorCode, ServerMessage};
use crate::relay::{RegisterPeerError, SignalingRelay};
use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::sending::{send_immediate_server_message, send_queued_message};

pub(super) async fn handle_socket(
    socket: WebSocket,
    relay: Arc<SignalingRelay>,
    addr: SocketAddr,
) {
    let (mut sender, mut receiver) = socket.split();
    let queue_capacity = relay.config().outbound_queue_size.max(1);
    let (tx, mut rx) = mpsc::channel::<Arc<ServerMessage>>(queue_capacity);

    let peer_id = match relay.register_peer(tx, addr) {
        Ok(peer_id) => {
            tracing::info!(%peer_id, client_addr = %addr, "WebSocket connection established");
            peer_id
        }
        Err(RegisterPeerError::IpLimitExceeded { current, limit }) => {
            let error_message = ServerMessage::Error {
                message: format!("Too many connections from your IP ({current}/{limit})"),
                error_code: Some(ErrorCode::TooManyConnections),
            };
            if let Err(err) = send_immediate_server_message(&mut sender, &error_message).await {
                tracing::debug!(
                    client_addr = %addr,
                    error = %err,
                    "Failed to send IP limit error frame"
                );
            }
            let _ = sender.close().await;
            return;
        }
    };

    // Drain the outbound queue onto the socket
    let relay_clone = relay.clone();
    let send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if send_queued_message(&mut sender, message, &peer_id)
                .await
                .is_err()
            {
                break;
            }
        }

        // Cleanup when send task ends
        relay_clone.unregister_peer(&peer_id).await;
    });

    // Handle incoming frames
    let relay_clone = relay.clone();
    let receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!(%peer_id, "WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let max_size = relay_clone.config().max_message_size;
                    if text.len() > max_size {
                        tracing::warn!(
                            %peer_id,
                            size = text.len(),
                            max = max_size,
                            "Message exceeds size limit"
                        );
                        relay_clone.send_error_to_peer(
                            &peer_id,
                            format!(
                                "Message too large ({} bytes, max {} bytes)",
                                text.len(),
                                max_size
                            ),
                            Some(ErrorCode::MessageTooLarge),
                        );
                        continue;
                    }

                    let client_message: ClientMessage = match serde_json::from_str(&text) {
                        Ok(message) => message,
                        Err(err) => {
                            tracing::warn!(
                                %peer_id,
                                error = %err,
                                "Rejected unparseable WebSocket frame"
                            );
                            relay_clone.send_error_to_peer(
                                &peer_id,
                                ErrorCode::InvalidMessage.description().to_string(),
                                Some(ErrorCode::InvalidMessage),
                            );
                            continue;
                        }
                    };

                    relay_clone
                        .handle_client_message(&peer_id, client_message)
                        .await;
                }
                Message::Close(_) => {
                    tracing::info!(%peer_id, "WebSocket connection closed");
                    break;
                }
                // Transport ping/pong is answered by axum; binary frames
                // have no meaning in this protocol.
                _ => {}
            }
        }

        // Cleanup when receive task ends
        relay_clone.unregister_peer(&peer_id).await;
    });

    // Wait for either task to complete
    tokio::select! {
        _ = send_task => {
            tracing::debug!(%peer_id, "Send task completed");
        }
        _ = receive_task => {
            tracing::debug!(%peer_id, "Receive task completed");
        }
    }

    // Ensure cleanup
    relay.unregister_peer(&peer_id).await;
}
