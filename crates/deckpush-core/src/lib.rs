//! # deckpush-core
//!
//! Shared library for DeckPush containing the per-button settings model,
//! the control-datagram wire codec, and the button label formatter.
//!
//! This crate is used by the plugin binary and by receiver-side tooling.
//! It has zero dependencies on OS APIs, async runtimes, or network sockets.
//!
//! # Architecture overview
//!
//! DeckPush turns a physical key panel into a bank of UDP triggers: every
//! press or release of a configured button fires a fixed 8-byte datagram at
//! a destination of the user's choosing.  This crate is the shared
//! foundation.  It defines:
//!
//! - **`domain`** – Pure business logic with no I/O.  [`ButtonSettings`] is
//!   the read-only snapshot of a button's configuration delivered by the
//!   host application, with every field optional and documented defaults.
//!   [`format_label`] renders a snapshot into the multi-line text shown on
//!   the button face.
//!
//! - **`protocol`** – How bytes travel over the network.  A
//!   [`ControlDatagram`] is exactly 8 bytes: the edge-selected value and the
//!   button index, each as a signed little-endian 32-bit integer.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `deckpush_core::ButtonSettings` instead of the full module path.
pub use domain::label::format_label;
pub use domain::settings::{ButtonEdge, ButtonSettings, DEFAULT_ADDRESS, DEFAULT_PORT};
pub use protocol::datagram::{ControlDatagram, DatagramError, DATAGRAM_LEN};
