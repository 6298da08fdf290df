//! # Trains
//!
//! Cluster-wide train identity: id allocation and teleport bookkeeping.

pub mod registry;
pub mod teleport;

pub use registry::{TrainRegistration, TrainRegistry};
pub use teleport::TeleportCoordinator;
