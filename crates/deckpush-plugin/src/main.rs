//! DeckPush plugin — entry point.
//!
//! The host application launches this binary and passes the connection
//! parameters on the command line:
//!
//! ```text
//! deckpush-plugin -port 28196 -pluginUUID <uuid> -registerEvent registerPlugin -info <json>
//! ```
//!
//! Note the single-dash long options — that is the host's convention, so
//! [`normalize_launch_args`] rewrites the known flags into the double-dash
//! form `clap` expects before parsing.
//!
//! # What happens at startup
//!
//! 1. `tracing_subscriber` is initialised; the log level is controlled by
//!    the `RUST_LOG` environment variable (e.g., `RUST_LOG=debug`).
//! 2. Launch arguments are normalized and parsed into a [`Cli`] struct.
//! 3. The host session is started: WebSocket connect, registration frame,
//!    then the event loop until the host hangs up.
//!
//! The process lifetime is bound to the host connection — the host restarts
//! plugins, so there is no signal handling or reconnect loop here.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use deckpush_plugin::domain::config::PluginConfig;
use deckpush_plugin::infrastructure::{host, net::UdpTransmitter};

// ── Launch argument definitions ───────────────────────────────────────────────

/// DeckPush key-panel plugin.
///
/// Connects back to the device-control host over a local WebSocket and
/// pushes an 8-byte UDP datagram on every configured button press/release.
#[derive(Debug, Parser)]
#[command(
    name = "deckpush-plugin",
    about = "Pushes integer pairs over UDP on button edges",
    version
)]
struct Cli {
    /// WebSocket port the host is listening on (loopback only).
    #[arg(long = "port", env = "DECKPUSH_HOST_PORT")]
    port: u16,

    /// Opaque identifier assigned to this plugin instance by the host.
    #[arg(long = "pluginUUID", env = "DECKPUSH_PLUGIN_UUID")]
    plugin_uuid: String,

    /// Name of the registration event the host expects as the first frame.
    #[arg(long = "registerEvent", env = "DECKPUSH_REGISTER_EVENT")]
    register_event: String,

    /// Host environment description (application version, devices, locale).
    ///
    /// Accepted so the launch line parses; the plugin has no use for it.
    #[arg(long = "info", default_value = "")]
    info: String,
}

impl Cli {
    /// Converts the parsed launch arguments into a [`PluginConfig`].
    fn into_plugin_config(self) -> PluginConfig {
        PluginConfig {
            host_port: self.port,
            plugin_uuid: self.plugin_uuid,
            register_event: self.register_event,
        }
    }
}

/// Rewrites the host's single-dash long options into the double-dash form.
///
/// Only the four launch flags the host is documented to pass are rewritten;
/// everything else (including option values) is left untouched.
fn normalize_launch_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .map(|arg| match arg.as_str() {
            "-port" | "-pluginUUID" | "-registerEvent" | "-info" => format!("-{arg}"),
            _ => arg,
        })
        .collect()
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse_from(normalize_launch_args(std::env::args()));
    debug!("host info payload: {} bytes", cli.info.len());

    info!("DeckPush plugin starting — host port {}", cli.port);

    let config = cli.into_plugin_config();
    host::run(config, Arc::new(UdpTransmitter))
        .await
        .context("host session ended with an error")?;

    info!("DeckPush plugin stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn launch_line() -> Vec<String> {
        [
            "deckpush-plugin",
            "-port",
            "28196",
            "-pluginUUID",
            "4E9A8A7D",
            "-registerEvent",
            "registerPlugin",
            "-info",
            "{\"application\":{}}",
        ]
        .map(str::to_string)
        .to_vec()
    }

    #[test]
    fn test_normalize_rewrites_known_single_dash_flags() {
        // Act
        let args = normalize_launch_args(launch_line());

        // Assert
        assert_eq!(args[1], "--port");
        assert_eq!(args[3], "--pluginUUID");
        assert_eq!(args[5], "--registerEvent");
        assert_eq!(args[7], "--info");
    }

    #[test]
    fn test_normalize_leaves_values_untouched() {
        let args = normalize_launch_args(launch_line());
        assert_eq!(args[2], "28196");
        assert_eq!(args[4], "4E9A8A7D");
        assert_eq!(args[8], "{\"application\":{}}");
    }

    #[test]
    fn test_cli_parses_normalized_host_launch_line() {
        // Act
        let cli = Cli::parse_from(normalize_launch_args(launch_line()));

        // Assert
        assert_eq!(cli.port, 28196);
        assert_eq!(cli.plugin_uuid, "4E9A8A7D");
        assert_eq!(cli.register_event, "registerPlugin");
    }

    #[test]
    fn test_cli_info_defaults_to_empty() {
        let cli = Cli::parse_from([
            "deckpush-plugin",
            "--port",
            "1",
            "--pluginUUID",
            "U",
            "--registerEvent",
            "registerPlugin",
        ]);
        assert_eq!(cli.info, "");
    }

    #[test]
    fn test_into_plugin_config_carries_launch_values() {
        // Arrange
        let cli = Cli::parse_from(normalize_launch_args(launch_line()));

        // Act
        let config = cli.into_plugin_config();

        // Assert
        assert_eq!(config.host_port, 28196);
        assert_eq!(config.plugin_uuid, "4E9A8A7D");
        assert_eq!(config.register_event, "registerPlugin");
        assert_eq!(config.host_url(), "ws://127.0.0.1:28196");
    }
}
