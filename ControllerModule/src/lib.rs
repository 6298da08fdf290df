//! # Controller Module
//!
//! Cluster-wide authority of the train plugin. It hands out global train ids,
//! tracks which instance each train was last teleported to, and keeps the
//! directory of instances with their coarse status.
//!
//! The system is organized into several sub-modules:
//! - `train`: train id registry and teleport coordination
//! - `instance`: instance directory and status projection
//! - `link`: transport towards the instances
//! - `plugin`: the authority itself, as a lifecycle participant
//! - `service`: single-writer task serving requests from all instances

pub mod train;     // Train identity
pub mod instance;  // Instance directory
pub mod link;      // Instance transport
pub mod plugin;    // Controller plugin
pub mod service;   // Request serialization

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used items
pub use train::{TeleportCoordinator, TrainRegistration, TrainRegistry};
pub use instance::InstanceDirectory;
pub use link::InstanceLink;
pub use plugin::{ControllerPlugin, InstanceObserver};
pub use service::{start, ControllerHandle};
