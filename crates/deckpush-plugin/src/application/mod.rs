//! Application layer for deckpush-plugin.
//!
//! The single use case here — dispatching a button edge — depends only on
//! traits and `deckpush-core` types.  The infrastructure implementations
//! (UDP socket, host WebSocket) are injected at construction time, so the
//! use case is fully unit-testable without a network.

pub mod dispatch;

pub use dispatch::{DatagramTransmitter, DispatchUseCase, TitleSink, TransmitError};
