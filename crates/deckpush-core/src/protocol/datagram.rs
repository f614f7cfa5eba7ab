//! Binary codec for the control datagram.
//!
//! Wire format:
//! ```text
//! [value:4][index:4]
//! ```
//! Total size: 8 bytes, always.  Both fields are signed little-endian 32-bit
//! integers.  There is no header, no sequence number, and no checksum beyond
//! UDP's own — one datagram carries one button edge and the receiver treats
//! every 8-byte packet as a complete command.
//!
//! The index bytes are present even when the button label hides the index:
//! the `useIntegerIndex` flag is a display concern, and receivers depend on
//! the fixed length.

use thiserror::Error;

use crate::domain::settings::{ButtonEdge, ButtonSettings};

/// Size of an encoded control datagram in bytes.
pub const DATAGRAM_LEN: usize = 8;

/// Errors that can occur while decoding a control datagram.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatagramError {
    /// The byte slice is not exactly [`DATAGRAM_LEN`] bytes long.
    #[error("control datagram must be exactly {DATAGRAM_LEN} bytes, got {actual}")]
    WrongLength { actual: usize },
}

/// The integer pair carried by one button edge.
///
/// A datagram is constructed fresh per event and discarded once the send
/// returns; it is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlDatagram {
    /// The edge-selected value (`integerValueDown` on press,
    /// `integerValueUp` on release).
    pub value: i32,
    /// The button's integer index.
    pub index: i32,
}

impl ControlDatagram {
    /// Builds the datagram for one edge of a button, resolving missing
    /// settings fields to 0.
    pub fn for_edge(settings: &ButtonSettings, edge: ButtonEdge) -> Self {
        Self {
            value: settings.value_for(edge),
            index: settings.index(),
        }
    }

    /// Encodes the datagram into its fixed 8-byte wire image.
    pub fn encode(&self) -> [u8; DATAGRAM_LEN] {
        let mut buf = [0u8; DATAGRAM_LEN];
        buf[..4].copy_from_slice(&self.value.to_le_bytes());
        buf[4..].copy_from_slice(&self.index.to_le_bytes());
        buf
    }

    /// Decodes a received wire image.
    ///
    /// # Errors
    ///
    /// Returns [`DatagramError::WrongLength`] unless `bytes` is exactly
    /// [`DATAGRAM_LEN`] bytes — a shorter or longer packet is not a control
    /// datagram.
    pub fn decode(bytes: &[u8]) -> Result<Self, DatagramError> {
        if bytes.len() != DATAGRAM_LEN {
            return Err(DatagramError::WrongLength {
                actual: bytes.len(),
            });
        }

        let value = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let index = i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        Ok(Self { value, index })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
