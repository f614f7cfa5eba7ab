//! Domain layer for deckpush-plugin.
//!
//! Pure types only: the JSON "language" spoken with the host application and
//! the plugin's launch configuration.  Nothing here opens sockets, spawns
//! tasks, or reads the environment — that is the infrastructure layer's job.

pub mod config;
pub mod events;

pub use config::PluginConfig;
pub use events::{HostCommand, HostEvent};
