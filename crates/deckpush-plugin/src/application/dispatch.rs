//! DispatchUseCase: turns a button edge into a label refresh and one UDP
//! datagram.
//!
//! This use case is the heart of the plugin.  It receives a settings
//! snapshot plus an edge kind from the host session, renders the label,
//! encodes the 8-byte control datagram, and hands it to the
//! [`DatagramTransmitter`].  Everything is fire-and-forget: a transmit
//! failure degrades to a visible `"Error"` label and is never propagated to
//! the caller.
//!
//! # Architecture
//!
//! The use case depends only on traits ([`DatagramTransmitter`],
//! [`TitleSink`]) and domain types.  Infrastructure implementations are
//! injected at construction time.

use std::sync::Arc;

use async_trait::async_trait;
use deckpush_core::{format_label, ButtonEdge, ButtonSettings, ControlDatagram, DATAGRAM_LEN};
use thiserror::Error;
use tracing::{debug, warn};

/// Label shown when a send fails at the OS level.
pub const ERROR_TITLE: &str = "Error";

/// Error type for datagram transmission.
#[derive(Debug, Error)]
pub enum TransmitError {
    /// The ephemeral local socket could not be bound.
    #[error("failed to bind ephemeral UDP socket: {0}")]
    Bind(#[source] std::io::Error),

    /// The OS rejected the send (unreachable route, unresolvable host, ...).
    #[error("failed to send datagram to {dest}: {source}")]
    Send {
        dest: String,
        #[source]
        source: std::io::Error,
    },
}

/// The host connection closed before a title update could be queued.
#[derive(Debug, Error)]
#[error("host connection closed before the title update could be queued")]
pub struct TitleClosed;

/// Trait for sending one encoded control datagram to a destination.
///
/// The production implementation opens an ephemeral UDP socket per call;
/// test implementations record calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatagramTransmitter: Send + Sync {
    /// Sends `payload` to `host:port` and returns once the OS has accepted
    /// (or rejected) the datagram.  No delivery confirmation exists.
    async fn send(
        &self,
        payload: [u8; DATAGRAM_LEN],
        host: &str,
        port: u16,
    ) -> Result<(), TransmitError>;
}

/// Trait for updating a button's visible label.
///
/// The production implementation queues a `setTitle` command on the host
/// session; test implementations record calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TitleSink: Send + Sync {
    /// Replaces the label of the button instance identified by `context`.
    async fn set_title(&self, context: &str, title: &str) -> Result<(), TitleClosed>;
}

/// The dispatch use case.
///
/// Holds no mutable state: every call works on the settings snapshot it was
/// given, so concurrent dispatches for rapid presses need no locking.
pub struct DispatchUseCase {
    transmitter: Arc<dyn DatagramTransmitter>,
    titles: Arc<dyn TitleSink>,
}

impl DispatchUseCase {
    /// Creates a new use case with the given infrastructure seams.
    pub fn new(transmitter: Arc<dyn DatagramTransmitter>, titles: Arc<dyn TitleSink>) -> Self {
        Self {
            transmitter,
            titles,
        }
    }

    /// Re-renders the button label from the current settings.
    ///
    /// Used on its own for appear/settings-change events, and as the first
    /// step of every edge dispatch.  A dropped title update is logged and
    /// swallowed: the session is closing anyway when the queue is gone.
    pub async fn refresh_title(&self, context: &str, settings: &ButtonSettings) {
        let label = format_label(settings);
        if let Err(e) = self.titles.set_title(context, &label).await {
            debug!("label refresh for {context} dropped: {e}");
        }
    }

    /// Handles one press/release edge of a button.
    ///
    /// The label is refreshed regardless of the send outcome; the datagram
    /// is then encoded and fired at the configured destination.  A transmit
    /// failure sets the label to [`ERROR_TITLE`] and returns normally —
    /// nothing in this path is fatal and nothing is retried.
    pub async fn handle_edge(&self, context: &str, settings: &ButtonSettings, edge: ButtonEdge) {
        self.refresh_title(context, settings).await;

        let payload = ControlDatagram::for_edge(settings, edge).encode();
        let (host, port) = settings.destination();

        match self.transmitter.send(payload, host, port).await {
            Ok(()) => debug!("{edge:?} datagram sent to {host}:{port}"),
            Err(e) => {
                warn!("{edge:?} datagram to {host}:{port} failed: {e}");
                if let Err(e) = self.titles.set_title(context, ERROR_TITLE).await {
                    debug!("error label for {context} dropped: {e}");
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn settings() -> ButtonSettings {
        ButtonSettings {
            integer_index: Some(3),
            integer_value_down: Some(5),
            integer_value_up: Some(-1),
            ip_address: Some("10.0.0.5".to_string()),
            ip_port: Some("9000".to_string()),
            ..ButtonSettings::default()
        }
    }

    fn accepting_titles() -> MockTitleSink {
        let mut titles = MockTitleSink::new();
        titles.expect_set_title().returning(|_, _| Ok(()));
        titles
    }

    #[tokio::test]
    async fn test_press_sends_down_value_to_configured_destination() {
        // Arrange
        let mut transmitter = MockDatagramTransmitter::new();
        transmitter
            .expect_send()
            .withf(|payload, host, port| {
                payload == &[0x05, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00]
                    && host == "10.0.0.5"
                    && *port == 9000
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let use_case = DispatchUseCase::new(Arc::new(transmitter), Arc::new(accepting_titles()));

        // Act
        use_case
            .handle_edge("ctx", &settings(), ButtonEdge::Press)
            .await;
    }

    #[tokio::test]
    async fn test_release_sends_up_value() {
        // Arrange
        let mut transmitter = MockDatagramTransmitter::new();
        transmitter
            .expect_send()
            .withf(|payload, _, _| payload == &[0xFF, 0xFF, 0xFF, 0xFF, 0x03, 0x00, 0x00, 0x00])
            .times(1)
            .returning(|_, _, _| Ok(()));

        let use_case = DispatchUseCase::new(Arc::new(transmitter), Arc::new(accepting_titles()));

        // Act
        use_case
            .handle_edge("ctx", &settings(), ButtonEdge::Release)
            .await;
    }

    #[tokio::test]
    async fn test_unconfigured_settings_send_zeroes_to_defaults() {
        // Arrange – a freshly placed button
        let mut transmitter = MockDatagramTransmitter::new();
        transmitter
            .expect_send()
            .withf(|payload, host, port| {
                payload == &[0u8; DATAGRAM_LEN] && host == "127.0.0.1" && *port == 3615
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let use_case = DispatchUseCase::new(Arc::new(transmitter), Arc::new(accepting_titles()));

        // Act
        use_case
            .handle_edge("ctx", &ButtonSettings::default(), ButtonEdge::Press)
            .await;
    }

    #[tokio::test]
    async fn test_label_refreshed_before_send() {
        // Arrange – the label must reflect current settings even if the send
        // then fails, so the refresh comes first.
        let mut seq = Sequence::new();

        let mut titles = MockTitleSink::new();
        titles
            .expect_set_title()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let mut transmitter = MockDatagramTransmitter::new();
        transmitter
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let use_case = DispatchUseCase::new(Arc::new(transmitter), Arc::new(titles));

        // Act
        use_case
            .handle_edge("ctx", &settings(), ButtonEdge::Press)
            .await;
    }

    #[tokio::test]
    async fn test_transmit_failure_sets_error_title_and_does_not_propagate() {
        // Arrange
        let mut transmitter = MockDatagramTransmitter::new();
        transmitter.expect_send().returning(|_, _, port| {
            Err(TransmitError::Send {
                dest: format!("10.0.0.5:{port}"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "unreachable"),
            })
        });

        let mut titles = MockTitleSink::new();
        // First the regular label refresh, then the error indicator.
        titles
            .expect_set_title()
            .withf(|_, title| title != ERROR_TITLE)
            .times(1)
            .returning(|_, _| Ok(()));
        titles
            .expect_set_title()
            .with(eq("ctx"), eq(ERROR_TITLE))
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = DispatchUseCase::new(Arc::new(transmitter), Arc::new(titles));

        // Act – must return normally despite the failure
        use_case
            .handle_edge("ctx", &settings(), ButtonEdge::Press)
            .await;
    }

    #[tokio::test]
    async fn test_refresh_title_renders_current_settings() {
        // Arrange
        let mut titles = MockTitleSink::new();
        titles
            .expect_set_title()
            .with(eq("ctx"), eq("D 5\nR -1\nIP 10.0.0.5\nP 9000"))
            .times(1)
            .returning(|_, _| Ok(()));

        let transmitter = MockDatagramTransmitter::new();
        let use_case = DispatchUseCase::new(Arc::new(transmitter), Arc::new(titles));

        // Act
        use_case.refresh_title("ctx", &settings()).await;
    }

    #[tokio::test]
    async fn test_closed_title_sink_is_swallowed() {
        // Arrange – the host session is tearing down; dispatch must not panic.
        let mut titles = MockTitleSink::new();
        titles.expect_set_title().returning(|_, _| Err(TitleClosed));

        let mut transmitter = MockDatagramTransmitter::new();
        transmitter.expect_send().returning(|_, _, _| Ok(()));

        let use_case = DispatchUseCase::new(Arc::new(transmitter), Arc::new(titles));

        // Act
        use_case
            .handle_edge("ctx", &settings(), ButtonEdge::Press)
            .await;
    }
}
