//! deckpush-plugin library crate.
//!
//! This crate is the plugin binary that sits between the device-control host
//! application and the network: the host reports button presses and releases
//! over a local WebSocket, and the plugin answers each one with a single
//! 8-byte UDP datagram plus a label refresh.
//!
//! # Architecture
//!
//! ```text
//! Host application (JSON over WebSocket, localhost)
//!         ↕
//! [deckpush-plugin]
//!   ├── domain/           Pure types: host event/command JSON, PluginConfig
//!   ├── application/      The dispatch use case (trait seams, no I/O)
//!   └── infrastructure/
//!         ├── host/       WebSocket session with the host (tokio-tungstenite)
//!         └── net/        One-shot UDP transmitter (tokio)
//!         ↕
//! UDP receiver (8-byte control datagram, fire-and-forget)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O, no async, and no framework dependencies beyond serde.
//! - `application` depends on `domain` and `deckpush-core` only, through traits.
//! - `infrastructure` depends on all other layers plus `tokio` and `tungstenite`.

/// Domain layer: pure business-logic types (no I/O).
pub mod domain;

/// Application layer: the dispatch use case.
pub mod application;

/// Infrastructure layer: host WebSocket session and UDP transmitter.
pub mod infrastructure;
