//! # Common Types
//!
//! Identifier aliases used across the instance and controller modules.

/// Identifier of one game-server instance in the cluster
pub type InstanceId = i32;

/// Cluster-wide train identifier, allocated by the controller starting at 1
pub type GlobalTrainId = u64;

/// Train identifier as known to a single instance's game process
pub type LocalTrainId = u64;

/// Coordinate type used for zone bounds
pub type Coord = f64;
