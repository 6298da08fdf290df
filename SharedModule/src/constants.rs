//! # Shared Constants
//!
//! Names that both sides of the cluster must agree on: config fields,
//! IPC channels raised by the game process, and the remote functions the
//! game process exposes.

/// Config field names
pub mod config {
    /// Instance config field holding the display name
    pub const INSTANCE_NAME_FIELD: &str = "instance.name";
}

/// IPC channels the game process raises towards its instance
pub mod ipc {
    pub const ZONE_ADD: &str = "clusterio_trains_zone_add";
    pub const ZONE_DELETE: &str = "clusterio_trains_zone_delete";
    pub const ZONE_LINK: &str = "clusterio_trains_zone_link";
    pub const ZONE_STATUS: &str = "clusterio_trains_zone_status";
}

/// Remote functions invoked on the game process
pub mod remote {
    /// Upsert or remove a single zone
    pub const SYNC_ZONE: &str = "clusterio_trains.sync_zone";

    /// Replace the full zone mapping
    pub const SYNC_ZONES: &str = "clusterio_trains.sync_zones";

    /// Hand a teleported train over to the destination game process
    pub const RECEIVE_TRAIN: &str = "clusterio_trains.receive_train";
}
