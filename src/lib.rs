#![cfg_attr(not(test), deny(clippy::panic))]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

//! # EmotiSound Signaling Relay
//!
//! A lightweight, in-memory WebSocket signaling relay for browser peer-to-peer
//! audio/video calls.
//!
//! The relay tracks which peers are in which named rooms and forwards opaque
//! SDP/ICE payloads between them. It never touches media bytes and keeps no
//! persistent state -- just run the binary and connect via WebSocket.

/// Server configuration and environment variables
pub mod config;

/// Structured logging configuration
pub mod logging;

/// Relay counters exposed at `/metrics`
pub mod metrics;

/// WebSocket message protocol definitions
pub mod protocol;

/// Room membership tracking and signal routing
pub mod relay;

/// WebSocket connection handling
pub mod websocket;
