//! Per-button settings snapshot and the press/release edge type.
//!
//! The host application stores one settings object per button instance and
//! delivers a snapshot of it with every event.  Every field is optional:
//! a freshly placed button has an empty settings object, and older settings
//! may predate newer fields.  The accessors on [`ButtonSettings`] resolve
//! the documented defaults for the wire path; the label formatter reads the
//! raw options instead, so a field the user never filled in renders as an
//! empty string rather than a default address.
//!
//! # Serde default values
//!
//! The host serialises settings as camelCase JSON
//! (`{"integerValueDown": 5, "ipAddress": "10.0.0.5", ...}`).  Fields absent
//! from the JSON deserialize to `None` via `#[serde(default)]`, which keeps
//! first-run buttons and settings written by older plugin versions working
//! without migration logic.

use serde::{Deserialize, Serialize};

/// Destination address used when `ipAddress` is absent.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1";

/// Destination port used when `ipPort` is absent or unparsable.
///
/// An unparsable port string deliberately falls back to this constant rather
/// than 0: port 0 is not a routable destination, and a settings typo must
/// not silently disable the button.
pub const DEFAULT_PORT: u16 = 3615;

/// A press (key-down) or release (key-up) transition of a physical button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEdge {
    /// The button was pushed down.  Selects `integerValueDown`.
    Press,
    /// The button was let go.  Selects `integerValueUp`.
    Release,
}

/// Read-only snapshot of one button's configuration.
///
/// Owned by the host application; the plugin receives a fresh copy with each
/// event and never persists it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonSettings {
    /// Identifies which of the receiver's integer slots this button drives.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integer_index: Option<i32>,

    /// Value sent when the button is pressed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integer_value_down: Option<i32>,

    /// Value sent when the button is released.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integer_value_up: Option<i32>,

    /// Whether the button label shows the index line.
    ///
    /// This flag affects only the label: the index bytes are always present
    /// on the wire so receivers can rely on a fixed 8-byte datagram.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_integer_index: Option<bool>,

    /// Destination IP address or hostname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    /// Destination UDP port, stored as a string by the host's settings UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_port: Option<String>,
}

impl ButtonSettings {
    /// Returns the integer index, defaulting to 0.
    pub fn index(&self) -> i32 {
        self.integer_index.unwrap_or(0)
    }

    /// Returns the value to transmit for `edge`, defaulting to 0.
    pub fn value_for(&self, edge: ButtonEdge) -> i32 {
        match edge {
            ButtonEdge::Press => self.integer_value_down.unwrap_or(0),
            ButtonEdge::Release => self.integer_value_up.unwrap_or(0),
        }
    }

    /// Returns the destination address, defaulting to [`DEFAULT_ADDRESS`].
    pub fn address(&self) -> &str {
        match self.ip_address.as_deref() {
            Some(addr) if !addr.is_empty() => addr,
            _ => DEFAULT_ADDRESS,
        }
    }

    /// Parses the destination port, falling back to [`DEFAULT_PORT`] when
    /// the field is absent, empty, or not a base-10 port number.
    pub fn port(&self) -> u16 {
        match self.ip_port.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_PORT,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!("unparsable port {raw:?}; falling back to {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
        }
    }

    /// Resolves the full `(address, port)` destination for the wire path.
    pub fn destination(&self) -> (&str, u16) {
        (self.address(), self.port())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
