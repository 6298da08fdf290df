//! # SharedModule
//!
//! Shared types and utilities used by both the instance and controller
//! modules of the cluster train plugin. This crate contains the zone data
//! model, the messages exchanged over the cluster transport, and the remote
//! commands understood by the game process, so both sides agree on one
//! definition of each.

// Export module structure
pub mod types;
pub mod zone;
pub mod ipc;
pub mod messages;
pub mod lifecycle;
pub mod constants;
pub mod config;
pub mod error;
pub mod rcon;

// Re-export commonly used items for convenience
pub use types::*;
pub use zone::{Zone, ZoneConfig, ZoneSummary, ZoneTarget};
pub use ipc::ZoneIpcEvent;
pub use lifecycle::{
    InstanceInfo, InstanceStatus, LifecycleParticipant, PlayerEvent, SimpleInstanceStatus,
};
pub use config::PluginConfig;
pub use error::{TrainsError, TrainsResult};
