//! Host bridge: the WebSocket session with the device-control application.
//!
//! The host launches the plugin process, and the plugin connects back to
//! `ws://127.0.0.1:{port}`.  The first frame after the upgrade must be the
//! registration frame (`{"event": <registerEvent>, "uuid": <pluginUUID>}`);
//! after that the host streams lifecycle and input events as JSON text
//! frames, and the plugin answers with display commands on the same socket.
//!
//! # Session structure
//!
//! ```text
//! run()
//!  ├─ connect + register
//!  ├─ writer task        -- drains the command queue into the WebSocket sink
//!  └─ event loop         -- decodes frames, plans work, spawns one task per edge
//! ```
//!
//! Each key edge dispatch runs on its own Tokio task so a slow send can
//! never stall the event loop; two rapid presses legally overlap.  When the
//! host closes the socket the loop ends and the process exits — the host
//! restarts plugins itself, so there is no reconnect logic here.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite, tungstenite::Message as WsMessage};
use tracing::{debug, error, info, trace, warn};

use deckpush_core::{ButtonEdge, ButtonSettings};

use crate::application::dispatch::{
    DatagramTransmitter, DispatchUseCase, TitleClosed, TitleSink,
};
use crate::domain::config::PluginConfig;
use crate::domain::events::{
    HostCommand, HostEvent, RegistrationFrame, TitlePayload, PUSH_INTEGER_ACTION,
};

/// Queue depth for outbound host commands.
///
/// Label refreshes are tiny and the host drains them quickly; 64 in flight
/// means the UI is wedged, at which point dropping the session is correct.
const COMMAND_QUEUE_DEPTH: usize = 64;

/// Error type for the host session.
#[derive(Debug, Error)]
pub enum HostBridgeError {
    /// The WebSocket connection to the host could not be established.
    #[error("failed to connect to host at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tungstenite::Error,
    },

    /// The registration frame could not be delivered.
    #[error("failed to send registration frame: {0}")]
    Register(#[source] tungstenite::Error),

    /// A frame could not be serialized to JSON.
    #[error("failed to encode host frame: {0}")]
    Encode(#[from] serde_json::Error),

    /// The WebSocket stream reported an I/O or protocol error.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
}

// ── Outbound command queue ────────────────────────────────────────────────────

/// [`TitleSink`] implementation backed by the session's outbound command
/// queue.  The writer task on the other end serializes each command and
/// pushes it into the WebSocket sink.
pub struct CommandQueue {
    tx: mpsc::Sender<HostCommand>,
}

impl CommandQueue {
    pub fn new(tx: mpsc::Sender<HostCommand>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl TitleSink for CommandQueue {
    async fn set_title(&self, context: &str, title: &str) -> Result<(), TitleClosed> {
        self.tx
            .send(HostCommand::SetTitle {
                context: context.to_string(),
                payload: TitlePayload::both(title),
            })
            .await
            .map_err(|_| TitleClosed)
    }
}

// ── Event planning ────────────────────────────────────────────────────────────

/// What the session should do in response to one host event.
#[derive(Debug, Clone, PartialEq)]
pub enum Work {
    /// Fire a datagram for a press/release edge (includes a label refresh).
    Edge {
        context: String,
        settings: ButtonSettings,
        edge: ButtonEdge,
    },
    /// Refresh the label only.
    Refresh {
        context: String,
        settings: ButtonSettings,
    },
}

/// Maps a decoded host event to the work it demands, if any.
///
/// Events addressed to a different action, and event kinds this plugin does
/// not react to, map to `None`.  Pure function — the session loop owns the
/// spawning.
pub fn plan(event: HostEvent) -> Option<Work> {
    match event {
        HostEvent::KeyDown {
            action,
            context,
            payload,
        } if action == PUSH_INTEGER_ACTION => Some(Work::Edge {
            context,
            settings: payload.settings,
            edge: ButtonEdge::Press,
        }),

        HostEvent::KeyUp {
            action,
            context,
            payload,
        } if action == PUSH_INTEGER_ACTION => Some(Work::Edge {
            context,
            settings: payload.settings,
            edge: ButtonEdge::Release,
        }),

        HostEvent::WillAppear {
            action,
            context,
            payload,
        }
        | HostEvent::DidReceiveSettings {
            action,
            context,
            payload,
        } if action == PUSH_INTEGER_ACTION => Some(Work::Refresh {
            context,
            settings: payload.settings,
        }),

        _ => None,
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Runs one complete host session: connect, register, pump events until the
/// host hangs up.
///
/// # Errors
///
/// Returns [`HostBridgeError`] when the connection cannot be established,
/// registration fails, or the stream dies mid-session.  A clean close from
/// the host side is a normal `Ok(())` return.
pub async fn run(
    config: PluginConfig,
    transmitter: Arc<dyn DatagramTransmitter>,
) -> Result<(), HostBridgeError> {
    let url = config.host_url();

    let (ws, _response) =
        connect_async(url.as_str())
            .await
            .map_err(|source| HostBridgeError::Connect {
                url: url.clone(),
                source,
            })?;
    info!("connected to host at {url}");

    let (mut sink, mut stream) = ws.split();

    // Registration must be the first frame after the upgrade; the host
    // discards plugins that send anything else.
    let registration = serde_json::to_string(&RegistrationFrame {
        event: &config.register_event,
        uuid: &config.plugin_uuid,
    })?;
    sink.send(WsMessage::Text(registration))
        .await
        .map_err(HostBridgeError::Register)?;
    info!(
        "registered with event {:?} as {}",
        config.register_event, config.plugin_uuid
    );

    // Writer task: single owner of the sink, fed by the command queue.
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<HostCommand>(COMMAND_QUEUE_DEPTH);
    let writer = tokio::spawn(async move {
        while let Some(command) = cmd_rx.recv().await {
            let text = match serde_json::to_string(&command) {
                Ok(text) => text,
                Err(e) => {
                    error!("failed to encode host command: {e}");
                    continue;
                }
            };
            if let Err(e) = sink.send(WsMessage::Text(text)).await {
                warn!("host write failed: {e}");
                break;
            }
        }
    });

    let dispatcher = Arc::new(DispatchUseCase::new(
        transmitter,
        Arc::new(CommandQueue::new(cmd_tx)),
    ));

    // Event loop: decode, plan, spawn.
    let result = loop {
        let frame = match stream.next().await {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => break Err(HostBridgeError::WebSocket(e)),
            None => {
                info!("host stream ended");
                break Ok(());
            }
        };

        match frame {
            WsMessage::Text(text) => {
                match serde_json::from_str::<HostEvent>(&text) {
                    Ok(event) => {
                        if let Some(work) = plan(event) {
                            spawn_work(&dispatcher, work);
                        } else {
                            trace!("no work for host frame");
                        }
                    }
                    // The host sends event kinds and shapes we do not model;
                    // an undecodable frame is expected traffic, not an error.
                    Err(e) => debug!("undecodable host frame: {e}"),
                }
            }
            WsMessage::Close(_) => {
                info!("host closed the connection");
                break Ok(());
            }
            // tungstenite answers protocol-level pings itself.
            WsMessage::Ping(_) | WsMessage::Pong(_) => {}
            other => debug!("ignoring non-text frame ({} bytes)", other.len()),
        }
    };

    writer.abort();
    result
}

/// Spawns one task for a unit of planned work.
fn spawn_work(dispatcher: &Arc<DispatchUseCase>, work: Work) {
    let dispatcher = Arc::clone(dispatcher);
    tokio::spawn(async move {
        match work {
            Work::Edge {
                context,
                settings,
                edge,
            } => dispatcher.handle_edge(&context, &settings, edge).await,
            Work::Refresh { context, settings } => {
                dispatcher.refresh_title(&context, &settings).await
            }
        }
    });
}

// ── Tests ─────────────────────────────────────────────────────────────────────
