//! JSON message types for the host-facing WebSocket protocol.
//!
//! The host speaks newline-free JSON text frames in both directions.  Every
//! frame is an object with an `"event"` field that identifies the variant;
//! serde's `#[serde(tag = "event")]` attribute handles the discriminant
//! automatically.
//!
//! # Message flow
//!
//! ```text
//! Host → Plugin:  JSON text frame  →  HostEvent
//! Plugin → Host:  HostCommand      →  JSON text frame
//! ```
//!
//! # Why separate inbound and outbound message types?
//!
//! The two directions carry different information: the host *sends* lifecycle
//! and input events (willAppear, keyDown, ...), the plugin *sends* display
//! commands (setTitle).  Two distinct enums make it a compile-time error to
//! accidentally send an inbound event back to the host, and vice versa.

use deckpush_core::ButtonSettings;
use serde::{Deserialize, Serialize};

/// Action identifier declared in the plugin manifest.
///
/// Events carry the action they belong to; anything not addressed to this
/// action is ignored.
pub const PUSH_INTEGER_ACTION: &str = "io.deckpush.push-integer";

/// Title target value meaning "both the hardware key display and the
/// software preview".
pub const TITLE_TARGET_BOTH: u8 = 0;

// ── Host → Plugin events ──────────────────────────────────────────────────────

/// Per-event payload carrying the button's settings snapshot.
///
/// The host includes more fields (coordinates, state, multi-action flags);
/// the plugin only needs the settings, and serde skips the rest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventPayload {
    /// Settings snapshot for the button instance the event belongs to.
    /// A freshly placed button carries an empty object.
    #[serde(default)]
    pub settings: ButtonSettings,
}

/// All host events the plugin reacts to.
///
/// # Serde representation
///
/// ```json
/// {"event":"keyDown","action":"io.deckpush.push-integer","context":"AB12","payload":{"settings":{...}}}
/// {"event":"willAppear","action":"io.deckpush.push-integer","context":"AB12","payload":{"settings":{}}}
/// ```
///
/// The host emits many more event kinds (device connectivity, title
/// parameter changes, ...).  Unknown tags deserialize into [`HostEvent::Unhandled`]
/// instead of failing, so new host versions never break the event loop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum HostEvent {
    /// A button instance became visible (profile switch, page change, app
    /// start).  Triggers a label refresh.
    WillAppear {
        /// Action identifier the event is addressed to.
        action: String,
        /// Opaque identifier of the button instance.
        context: String,
        #[serde(default)]
        payload: EventPayload,
    },

    /// The user changed settings in the configuration UI.  Triggers a label
    /// refresh.
    DidReceiveSettings {
        action: String,
        context: String,
        #[serde(default)]
        payload: EventPayload,
    },

    /// The physical button was pushed down.
    KeyDown {
        action: String,
        context: String,
        #[serde(default)]
        payload: EventPayload,
    },

    /// The physical button was let go.
    KeyUp {
        action: String,
        context: String,
        #[serde(default)]
        payload: EventPayload,
    },

    /// Any event kind this plugin does not react to.
    #[serde(other)]
    Unhandled,
}

// ── Plugin → Host commands ────────────────────────────────────────────────────

/// Payload of a `setTitle` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitlePayload {
    /// The text to display on the button face.
    pub title: String,
    /// Where to apply the title: 0 = both, 1 = hardware only, 2 = software only.
    pub target: u8,
}

impl TitlePayload {
    /// Builds a payload targeting both the hardware key and the software
    /// preview.
    pub fn both(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            target: TITLE_TARGET_BOTH,
        }
    }
}

/// All commands the plugin sends to the host.
///
/// # Serde representation
///
/// ```json
/// {"event":"setTitle","context":"AB12","payload":{"title":"D 5\nR 0\nIP \nP ","target":0}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum HostCommand {
    /// Replaces the visible label of a button instance.
    SetTitle {
        /// Opaque identifier of the button instance.
        context: String,
        payload: TitlePayload,
    },
}

/// The registration frame sent as the very first message after the
/// WebSocket upgrade.
///
/// The event name is dictated by the host at launch time (via
/// `-registerEvent`), so this is a plain struct rather than a tagged enum
/// variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationFrame<'a> {
    /// Registration event name from the launch arguments.
    pub event: &'a str,
    /// Plugin instance UUID from the launch arguments, echoed verbatim.
    pub uuid: &'a str,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
