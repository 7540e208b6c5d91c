// WebSocket module - organized into focused submodules
//
// This module provides the WebSocket handler and HTTP endpoints for the
// signaling relay:
//
// - handler: WebSocket upgrade handler (entry point)
// - connection: per-connection send/receive loops
// - sending: message serialization and sending functions
// - routes: HTTP route setup (ws, health, metrics)

mod connection;
mod handler;
mod routes;
mod sending;

pub use handler::websocket_handler;
pub use routes::{create_router, metrics_handler};
