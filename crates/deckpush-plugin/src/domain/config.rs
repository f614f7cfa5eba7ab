//! Plugin launch configuration.
//!
//! The host application starts the plugin process and passes everything the
//! plugin needs on the command line: the local WebSocket port to connect
//! back to, an opaque UUID identifying this plugin instance, and the name of
//! the registration event the host expects as the first frame.
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! reads inside the domain) makes the session logic easy to drive from tests.
//! The binary entry point is responsible for populating it from launch
//! arguments.

/// All runtime configuration for one plugin session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    /// WebSocket port the host is listening on (always on loopback).
    pub host_port: u16,

    /// Opaque identifier assigned to this plugin instance by the host.
    ///
    /// Echoed back verbatim in the registration frame; the plugin never
    /// parses or generates it.
    pub plugin_uuid: String,

    /// Name of the registration event the host expects as the first frame
    /// after the WebSocket upgrade.
    pub register_event: String,
}

impl PluginConfig {
    /// Returns the WebSocket URL of the host.
    ///
    /// The host only listens on loopback, so the address is fixed and only
    /// the port varies per launch.
    pub fn host_url(&self) -> String {
        format!("ws://127.0.0.1:{}", self.host_port)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
