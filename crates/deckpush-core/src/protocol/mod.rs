//! Protocol module containing the control-datagram wire codec.

pub mod datagram;

pub use datagram::{ControlDatagram, DatagramError, DATAGRAM_LEN};
