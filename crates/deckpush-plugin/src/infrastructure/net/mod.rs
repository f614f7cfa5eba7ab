//! One-shot UDP transmitter.
//!
//! Each call binds a fresh socket on an ephemeral local port, performs a
//! single `send_to`, and drops the socket — acquisition is scoped to the
//! call, so the descriptor is released unconditionally on every exit path.
//! There is no pooled or shared connection, no retry, and no delivery
//! confirmation: UDP either hands the datagram to the network or reports an
//! OS-level error, and either way the plugin moves on.
//!
//! Two rapid button edges may have two sockets open concurrently; each is
//! independent and ephemeral, so no coordination is needed.

use async_trait::async_trait;
use deckpush_core::DATAGRAM_LEN;
use tokio::net::UdpSocket;

use crate::application::dispatch::{DatagramTransmitter, TransmitError};

/// Production [`DatagramTransmitter`] backed by ephemeral UDP sockets.
pub struct UdpTransmitter;

#[async_trait]
impl DatagramTransmitter for UdpTransmitter {
    async fn send(
        &self,
        payload: [u8; DATAGRAM_LEN],
        host: &str,
        port: u16,
    ) -> Result<(), TransmitError> {
        // Port 0 asks the OS for any free local port.
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(TransmitError::Bind)?;

        socket
            .send_to(&payload, (host, port))
            .await
            .map_err(|source| TransmitError::Send {
                dest: format!("{host}:{port}"),
                source,
            })?;

        Ok(())
        // socket dropped here — one datagram, one socket
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
