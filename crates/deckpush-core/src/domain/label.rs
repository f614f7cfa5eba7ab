//! Button label rendering.
//!
//! The label mirrors the current settings on the button face so the user can
//! see at a glance what a press will send and where.  Rendering is a pure
//! function over the settings snapshot: same input, same string, no side
//! effects.

use crate::domain::settings::{ButtonEdge, ButtonSettings};

/// Renders a settings snapshot into the multi-line button label.
///
/// With `useIntegerIndex` enabled the label is five lines — index, down
/// value, up value, address, port.  Otherwise the index line is omitted.
/// Missing numeric fields render as 0; a missing address or port renders as
/// an empty string (not the wire-path default), so an unconfigured field is
/// visibly blank.
///
/// # Examples
///
/// ```rust
/// use deckpush_core::{format_label, ButtonSettings};
///
/// let label = format_label(&ButtonSettings::default());
/// assert_eq!(label, "D 0\nR 0\nIP \nP ");
/// ```
pub fn format_label(settings: &ButtonSettings) -> String {
    let down = settings.value_for(ButtonEdge::Press);
    let up = settings.value_for(ButtonEdge::Release);
    let address = settings.ip_address.as_deref().unwrap_or("");
    let port = settings.ip_port.as_deref().unwrap_or("");

    if settings.use_integer_index.unwrap_or(false) {
        format!(
            "I {}\nD {}\nR {}\nIP {}\nP {}",
            settings.index(),
            down,
            up,
            address,
            port
        )
    } else {
        format!("D {}\nR {}\nIP {}\nP {}", down, up, address, port)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
