//! # Instance Module
//!
//! Per-instance side of the cluster train plugin. Each game-server instance
//! owns its zones: it validates edits coming from its game process, keeps the
//! zone mapping, and mirrors every change back to the game process as remote
//! commands.
//!
//! The system is organized into several sub-modules:
//! - `zone`: geometry validation, the zone store and zone sync
//! - `trains`: global id requests and teleport reception
//! - `link`: requests sent to the controller
//! - `plugin`: lifecycle participant tying the above together
//! - `actor`: single-writer task running the plugin

pub mod zone;     // Zone registry
pub mod trains;   // Train ids and teleport reception
pub mod link;     // Controller transport
pub mod plugin;   // Lifecycle participant
pub mod actor;    // Per-instance actor

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used items
pub use zone::{RconChannel, ZoneRegistry, ZoneRejection, ZoneStore, ZoneSync};
pub use link::ControllerLink;
pub use plugin::InstancePlugin;
pub use actor::{spawn, InstanceHandle};
